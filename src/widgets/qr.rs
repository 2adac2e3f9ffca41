use hypertext::{Raw, prelude::*};
use qrcode::{QrCode, render::svg};

/// A scannable QR code for a payment request, with the request itself as a
/// link underneath for visitors on the phone they would pay with.
pub struct PaymentQr<'a> {
    pub uri: &'a str,
}

impl PaymentQr<'_> {
    fn svg(&self) -> Option<String> {
        let code = match QrCode::new(self.uri.as_bytes()) {
            Ok(code) => code,
            Err(e) => {
                tracing::error!("Could not encode payment QR code: {e}");
                return None;
            }
        };

        let image = code
            .render::<svg::Color>()
            .min_dimensions(200, 200)
            .dark_color(svg::Color("#1d4ed8"))
            .light_color(svg::Color("#ffffff"))
            .build();

        // drop the XML prolog, the image is inlined into HTML
        let start = image.find("<svg").unwrap_or(0);
        Some(image[start..].to_string())
    }
}

impl Renderable for PaymentQr<'_> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        let svg = self.svg();

        maud! {
            div class="payment-qr text-center" {
                @if let Some(svg) = &svg {
                    div class="d-inline-block bg-white rounded-3 p-3" {
                        (Raw::dangerously_create(svg))
                    }
                }
                p class="small mt-2 mb-0" {
                    a class="link-light" href=(self.uri) { "Open in a UPI app" }
                }
            }
        }
        .render_to(buffer);
    }
}

#[cfg(test)]
#[test]
fn renders_inline_svg() {
    let html = PaymentQr {
        uri: "upi://pay?pa=skillsprint%40upi&pn=SkillSprint&am=500&cu=INR",
    }
    .render()
    .into_inner();

    assert!(html.contains("<svg"));
    assert!(!html.contains("<?xml"));
    assert!(html.contains(r#"href="upi://pay?pa=skillsprint%40upi"#));
}
