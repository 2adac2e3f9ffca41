use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use axum_extra::extract::PrivateCookieJar;
use chrono::{DateTime, Utc};
use hypertext::prelude::*;

use crate::{
    event::EventConfig,
    funnel::{
        error::{FunnelError, ValidationError},
        handoff::{self, Handoff, PaymentHandoff, SuccessHandoff},
        in_flight::InFlight,
    },
    registrations::RegistrationStore,
    state::AppState,
    storage::{BlobStore, StoredObject},
    template::Page,
    util_resp::{StandardResponse, bad_request, failure, success},
    widgets::{
        actions::Actions,
        alert::{ErrorAlert, SuccessAlert},
        qr::PaymentQr,
    },
};

pub const MAX_SCREENSHOT_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit for `POST /payment`: the largest accepted screenshot
/// plus room for the multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_SCREENSHOT_BYTES + 64 * 1024;

/// How long "Upload Successful!" stays up before moving on to `/success`.
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

const SCREENSHOT_FIELD: &str = "screenshot";

/// A screenshot which passed the file checks and may be uploaded.
#[derive(Debug, Clone)]
pub struct SelectedScreenshot {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl SelectedScreenshot {
    pub fn select(
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<Self, ValidationError> {
        let file_name = file_name.unwrap_or_default().trim();
        if file_name.is_empty() && bytes.is_empty() {
            return Err(ValidationError::NoFileSelected);
        }

        let content_type = content_type.unwrap_or_default().trim();
        if !content_type.starts_with("image/") {
            return Err(ValidationError::NotAnImage);
        }

        if bytes.len() > MAX_SCREENSHOT_BYTES {
            return Err(ValidationError::FileTooLarge);
        }

        Ok(Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        })
    }

    /// Extension of the original file name, lower-cased; `png` if there is
    /// none usable.
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| {
                !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| "png".to_string())
    }
}

pub fn storage_key(registration_id: &str, at: DateTime<Utc>, ext: &str) -> String {
    format!("payments/{registration_id}-{}.{ext}", at.timestamp_millis())
}

/// Uploads the screenshot for the registration in `handoff` and records its
/// reference against the registration.
///
/// The upload and the update happen in that order; if the update fails the
/// uploaded object is left where it is. Only one upload per registration may
/// be in flight at a time.
pub async fn upload_screenshot(
    registrations: &dyn RegistrationStore,
    blobs: &dyn BlobStore,
    in_flight: &InFlight,
    handoff: &PaymentHandoff,
    screenshot: SelectedScreenshot,
    at: DateTime<Utc>,
) -> Result<StoredObject, FunnelError> {
    let _guard = in_flight
        .begin(format!("upload:{}", handoff.id))
        .ok_or(FunnelError::UploadInFlight)?;

    let key = storage_key(&handoff.id, at, &screenshot.extension());
    let stored = blobs
        .put(&key, screenshot.bytes, &screenshot.content_type)
        .await
        .map_err(FunnelError::Upload)?;

    registrations
        .attach_payment_screenshot(&handoff.id, &stored.reference)
        .await
        .map_err(FunnelError::RecordUpdate)?;

    Ok(stored)
}

pub async fn payment_page(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> StandardResponse {
    match handoff::read_payment(&jar, Utc::now().naive_utc()) {
        Handoff::Present(payment) => {
            success(render_payment_page(&state.event, &payment, None))
        }
        Handoff::Missing => bad_request(invalid_navigation()),
    }
}

pub async fn do_upload(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    multipart: Result<Multipart, MultipartRejection>,
) -> (PrivateCookieJar, StandardResponse) {
    let now = Utc::now();
    let Handoff::Present(payment) = handoff::read_payment(&jar, now.naive_utc())
    else {
        return (jar, bad_request(invalid_navigation()));
    };

    let result = match read_screenshot(multipart).await {
        Ok(screenshot) => {
            upload_screenshot(
                state.registrations.as_ref(),
                state.blobs.as_ref(),
                &state.in_flight,
                &payment,
                screenshot,
                now,
            )
            .await
        }
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(stored) => {
            tracing::info!(
                id = %payment.id,
                key = %stored.key,
                "Stored payment screenshot"
            );
            let jar = handoff::clear_payment(jar);
            let jar = handoff::write_success(
                jar,
                &SuccessHandoff {
                    team_name: payment.team_name,
                },
            );
            (jar, success(upload_successful()))
        }
        Err(e) => {
            e.log();
            let page =
                render_payment_page(&state.event, &payment, Some(e.to_string().as_str()));
            (jar, failure(e.status(), page))
        }
    }
}

async fn read_screenshot(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<SelectedScreenshot, ValidationError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!("Payment upload was not multipart: {e}");
        ValidationError::NoFileSelected
    })?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(SCREENSHOT_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(ToString::to_string);
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return SelectedScreenshot::select(
            file_name.as_deref(),
            content_type.as_deref(),
            bytes,
        );
    }

    Err(ValidationError::NoFileSelected)
}

fn multipart_error(e: MultipartError) -> ValidationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ValidationError::FileTooLarge
    } else {
        tracing::debug!("Could not read payment upload: {e}");
        ValidationError::UnreadableUpload
    }
}

fn invalid_navigation() -> Rendered<String> {
    Page::new()
        .title("Invalid Navigation")
        .body(maud! {
            div class="container py-5 text-center" style="max-width: 560px;" {
                div class="glass-card p-5" {
                    h1 class="h2 fw-bold mb-3" { "Invalid Navigation" }
                    p class="text-white-50" {
                        "Please register again to proceed with payment."
                    }
                    Actions options=(&[("/", "Go to Home")]);
                }
            }
        })
        .render()
}

fn upload_successful() -> Rendered<String> {
    let refresh = format!(
        "{};url=/success",
        SUCCESS_REDIRECT_DELAY.as_secs_f32()
    );

    Page::new_full()
        .title("Upload Successful")
        .extra_head(maud! {
            meta http-equiv="refresh" content=(refresh);
        })
        .body(maud! {
            div class="container py-5 text-center" style="max-width: 560px;" {
                div class="glass-card p-5" {
                    h1 class="h2 fw-bold text-success mb-3" { "Upload Successful!" }
                    SuccessAlert msg="Your payment screenshot has been submitted for verification.";
                    p class="text-white-50 small mb-0" {
                        "Taking you to your confirmation…"
                    }
                }
            }
        })
        .render()
}

fn render_payment_page(
    event: &EventConfig,
    payment: &PaymentHandoff,
    error: Option<&str>,
) -> Rendered<String> {
    let uri = event.payment.request_uri().to_string();
    let fee = event.payment.display_amount();

    Page::new()
        .title("Payment")
        .body(maud! {
            div class="container py-5" style="max-width: 720px;" {
                div class="glass-card p-4 p-md-5" {
                    h1 class="h2 fw-bold text-center mb-4" { "Complete Your Payment" }

                    dl class="row mb-4" {
                        dt class="col-sm-5 text-white-50" { "Team Name" }
                        dd class="col-sm-7" { (payment.team_name) }
                        dt class="col-sm-5 text-white-50" { "Team Leader" }
                        dd class="col-sm-7" { (payment.team_leader_name) }
                        dt class="col-sm-5 text-white-50" { "Registration Fee" }
                        dd class="col-sm-7 fw-bold" { (fee) }
                    }

                    div class="mb-4" {
                        h2 class="h5 text-center mb-3" { "Scan to pay" }
                        PaymentQr uri=(&uri);
                        p class="small text-white-50 text-center mt-2" {
                            "Pay " (fee) " to " (event.payment.payee_name)
                            " (" (event.payment.payee) ")"
                        }
                    }

                    h2 class="h5 mb-3" { "Upload payment screenshot" }
                    ol class="small text-white-50" {
                        li { "Pay the registration fee using the QR code above." }
                        li { "Take a screenshot of the completed payment." }
                        li { "Upload it here (images only, less than 5MB)." }
                    }

                    @if let Some(error) = error {
                        ErrorAlert msg=(error);
                    }

                    form method="post"
                        action="/payment"
                        enctype="multipart/form-data"
                        onsubmit="this.querySelector('button[type=submit]').disabled = true;"
                    {
                        div class="mb-3" {
                            label for="screenshot" class="form-label" {
                                "Payment screenshot *"
                            }
                            input type="file"
                                class="form-control"
                                id="screenshot"
                                name="screenshot"
                                accept="image/*"
                                required;
                        }
                        button type="submit" class="btn btn-primary w-100 py-2" {
                            "Upload Screenshot"
                        }
                    }

                    div class="mt-3" {
                        Actions options=(&[("/", "Back to Home")]);
                    }
                }
            }
        })
        .render()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn file_checks() {
        assert!(matches!(
            SelectedScreenshot::select(None, None, Bytes::new()),
            Err(ValidationError::NoFileSelected)
        ));
        assert!(matches!(
            SelectedScreenshot::select(
                Some("notes.txt"),
                Some("text/plain"),
                Bytes::from_static(b"hello")
            ),
            Err(ValidationError::NotAnImage)
        ));
        assert!(matches!(
            SelectedScreenshot::select(
                Some("huge.png"),
                Some("image/png"),
                Bytes::from(vec![0u8; MAX_SCREENSHOT_BYTES + 1])
            ),
            Err(ValidationError::FileTooLarge)
        ));
        assert!(
            SelectedScreenshot::select(
                Some("exact.png"),
                Some("image/png"),
                Bytes::from(vec![0u8; MAX_SCREENSHOT_BYTES])
            )
            .is_ok()
        );
    }

    #[test]
    fn extension_from_file_name() {
        let shot = |name: &str| SelectedScreenshot {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: Bytes::new(),
        };

        assert_eq!(shot("Receipt.JPG").extension(), "jpg");
        assert_eq!(shot("a.b.webp").extension(), "webp");
        assert_eq!(shot("screenshot").extension(), "png");
        assert_eq!(shot("trailing.").extension(), "png");
        assert_eq!(shot("../x.p/ng").extension(), "png");
    }

    #[test]
    fn key_layout() {
        let at = Utc.timestamp_millis_opt(1_726_000_000_123).unwrap();
        assert_eq!(
            storage_key("r1", at, "jpg"),
            "payments/r1-1726000000123.jpg"
        );
    }

    #[test]
    fn payment_page_offers_way_home() {
        let payment = PaymentHandoff {
            id: "r1".to_string(),
            team_name: "Alpha".to_string(),
            team_leader_name: "A. Lee".to_string(),
            team_leader_email: "a@x.com".to_string(),
            expires_at: Utc::now().naive_utc(),
        };
        let html =
            render_payment_page(&EventConfig::default(), &payment, None).into_inner();
        let form_end = html.find("</form>").unwrap();
        let back = html.find("Back to Home").unwrap();
        assert!(back > form_end);
        assert!(html.contains(r#"href="/""#));
    }

    #[test]
    fn success_page_moves_on() {
        let html = upload_successful().into_inner();
        assert!(html.contains("Upload Successful!"));
        assert!(html.contains(r#"content="1.5;url=/success""#));
    }
}
