use axum::{extract::State, response::Redirect};
use axum_extra::extract::{Form, PrivateCookieJar};
use chrono::{NaiveDateTime, Utc};
use hypertext::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    funnel::{
        error::{FunnelError, ValidationError},
        handoff::{self, PaymentHandoff},
        in_flight::InFlight,
    },
    registrations::{
        NewRegistration, Registration, RegistrationStore, TeamMember,
    },
    state::AppState,
    template::{ActiveNav, Page, form::TextField},
    util_resp::{StandardResponse, failure, see_other_ok, success},
    widgets::alert::ErrorAlert,
};

/// Teams have a leader plus up to this many other members.
pub const MAX_OTHER_MEMBERS: usize = 3;

/// The registration form as submitted. Everything is kept as text so that a
/// rejected submission can be shown again exactly as it was entered.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RegistrationForm {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub team_size: String,
    #[serde(default)]
    pub team_leader_name: String,
    #[serde(default)]
    pub team_leader_email: String,
    #[serde(default)]
    pub team_leader_phone: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub github_profile: String,
    #[serde(default)]
    pub linkedin_profile: String,
    #[serde(default)]
    pub team_members: Vec<String>,
    /// Identifies one rendering of the form; at most one submission per
    /// token may be in flight.
    #[serde(default)]
    pub form_token: String,
}

impl RegistrationForm {
    /// An empty form with a fresh token.
    pub fn blank() -> Self {
        Self {
            team_size: "2".to_string(),
            form_token: Uuid::new_v4().to_string(),
            ..Default::default()
        }
    }

    pub fn validate(
        &self,
        now: NaiveDateTime,
    ) -> Result<NewRegistration, ValidationError> {
        for (field, value) in [
            ("team_name", &self.team_name),
            ("team_leader_name", &self.team_leader_name),
            ("team_leader_email", &self.team_leader_email),
            ("team_leader_phone", &self.team_leader_phone),
        ] {
            if crate::validation::is_non_empty(value).is_err() {
                return Err(ValidationError::MissingRequiredField(field));
            }
        }

        let team_size = parse_team_size(&self.team_size)?;

        let active_members = self
            .team_members
            .iter()
            .map(|member| member.trim())
            .filter(|member| !member.is_empty())
            .collect::<Vec<_>>();
        let expected = (team_size - 1) as usize;
        if active_members.len() < expected {
            return Err(ValidationError::NotEnoughMembers {
                expected,
                provided: active_members.len(),
            });
        }

        if crate::validation::is_valid_email(&self.team_leader_email).is_err() {
            return Err(ValidationError::InvalidEmail);
        }

        let github_profile = optional_url(&self.github_profile, "GitHub")?;
        let linkedin_profile =
            optional_url(&self.linkedin_profile, "LinkedIn")?;

        Ok(NewRegistration {
            team_name: self.team_name.trim().to_string(),
            team_leader_name: self.team_leader_name.trim().to_string(),
            team_leader_email: self.team_leader_email.trim().to_string(),
            team_leader_phone: self.team_leader_phone.trim().to_string(),
            team_size,
            institution: optional_text(&self.institution),
            state: optional_text(&self.state),
            github_profile,
            linkedin_profile,
            team_members: active_members
                .into_iter()
                .take(expected)
                .enumerate()
                .map(|(i, name)| TeamMember::numbered(i, name))
                .collect(),
            registration_date: now,
        })
    }

    fn member(&self, index: usize) -> &str {
        self.team_members
            .get(index)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Parses the team size from the submitted text, ignoring anything which is
/// not a digit. Only 2, 3 and 4 are accepted.
pub fn parse_team_size(raw: &str) -> Result<i64, ValidationError> {
    let digits = raw.chars().filter(char::is_ascii_digit).collect::<String>();
    match digits.parse::<i64>() {
        Ok(size) if (2..=4).contains(&size) => Ok(size),
        _ => Err(ValidationError::TeamSizeOutOfRange),
    }
}

fn optional_text(value: &str) -> Option<String> {
    match value.trim() {
        "" => None,
        trimmed => Some(trimmed.to_string()),
    }
}

fn optional_url(
    value: &str,
    site: &'static str,
) -> Result<Option<String>, ValidationError> {
    match optional_text(value) {
        Some(url) => match crate::validation::is_valid_profile_url(&url) {
            Ok(()) => Ok(Some(url)),
            Err(_) => Err(ValidationError::InvalidProfileUrl(site)),
        },
        None => Ok(None),
    }
}

/// Validates `form` and creates one registration.
///
/// The insert is guarded by the form's token: while one submission of a form
/// is in flight, further submissions of the same form are refused with
/// [`FunnelError::SubmissionInFlight`] and never reach the store.
pub async fn submit_registration(
    store: &dyn RegistrationStore,
    in_flight: &InFlight,
    form: &RegistrationForm,
    now: NaiveDateTime,
) -> Result<Registration, FunnelError> {
    let token = form.form_token.trim();
    if token.is_empty() {
        return Err(ValidationError::MissingFormToken.into());
    }

    let new = form.validate(now)?;

    let _guard = in_flight
        .begin(format!("register:{token}"))
        .ok_or(FunnelError::SubmissionInFlight)?;

    store.create(new).await.map_err(FunnelError::Registration)
}

pub async fn registration_page() -> StandardResponse {
    success(render_registration_page(&RegistrationForm::blank(), None))
}

pub async fn do_register(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegistrationForm>,
) -> (PrivateCookieJar, StandardResponse) {
    let now = Utc::now().naive_utc();

    match submit_registration(
        state.registrations.as_ref(),
        &state.in_flight,
        &form,
        now,
    )
    .await
    {
        Ok(registration) => {
            tracing::info!(
                id = %registration.id,
                team = %registration.team_name,
                size = registration.team_size,
                "Registered team"
            );
            let jar = handoff::write_payment(
                jar,
                &PaymentHandoff::new(&registration, now),
            );
            (jar, see_other_ok(Redirect::to("/payment")))
        }
        Err(e) => {
            e.log();
            let mut form = form;
            if form.form_token.trim().is_empty() {
                form.form_token = Uuid::new_v4().to_string();
            }
            let page = render_registration_page(&form, Some(e.to_string().as_str()));
            (jar, failure(e.status(), page))
        }
    }
}

fn render_registration_page(
    form: &RegistrationForm,
    error: Option<&str>,
) -> Rendered<String> {
    Page::new()
        .title("Register")
        .active_nav(ActiveNav::Register)
        .body(maud! {
            div class="container py-5" style="max-width: 720px;" {
                div class="glass-card p-4 p-md-5" {
                    div class="text-center mb-4" {
                        h1 class="fw-bold mb-2" { "Register for Skill Sprint" }
                        p class="text-white-50" {
                            "Fill in your team details to participate"
                        }
                    }

                    @if let Some(error) = error {
                        ErrorAlert msg=(error);
                    }

                    (RegistrationFormFields { form })
                }
            }
        })
        .render()
}

struct RegistrationFormFields<'a> {
    form: &'a RegistrationForm,
}

impl Renderable for RegistrationFormFields<'_> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        let form = self.form;
        let member_labels = ["Team Member 1", "Team Member 2", "Team Member 3"];

        maud! {
            form method="post" action="/register"
                onsubmit="this.querySelector('button[type=submit]').disabled = true;"
            {
                input type="hidden" name="form_token" value=(form.form_token);

                div class="row" {
                    div class="col-md-6" {
                        (TextField::new("team_name", "Team Name", &form.team_name)
                            .placeholder("Enter your team name")
                            .required())
                    }
                    div class="col-md-6 mb-3" {
                        label for="team_size" class="form-label" { "Team Size *" }
                        select class="form-select" id="team_size" name="team_size" {
                            @for size in 2..=4 {
                                @if form.team_size.trim() == size.to_string() {
                                    option value=(size) selected {
                                        (size) " Members"
                                    }
                                } @else {
                                    option value=(size) {
                                        (size) " Members"
                                    }
                                }
                            }
                        }
                    }
                }

                h4 class="h5 border-top border-secondary pt-4 mb-3" {
                    "Team Leader Information"
                }
                div class="row" {
                    div class="col-md-6" {
                        (TextField::new("team_leader_name", "Full Name", &form.team_leader_name)
                            .placeholder("Enter full name")
                            .required())
                    }
                    div class="col-md-6" {
                        (TextField::new("team_leader_email", "Email", &form.team_leader_email)
                            .input_type("email")
                            .placeholder("Enter email address")
                            .required())
                    }
                    div class="col-md-6" {
                        (TextField::new("team_leader_phone", "Phone Number", &form.team_leader_phone)
                            .input_type("tel")
                            .placeholder("Enter phone number")
                            .required())
                    }
                    div class="col-md-6" {
                        (TextField::new("institution", "Institution", &form.institution)
                            .placeholder("College or organisation"))
                    }
                    div class="col-md-6" {
                        (TextField::new("state", "State", &form.state)
                            .placeholder("State you are joining from"))
                    }
                    div class="col-md-6" {
                        (TextField::new("github_profile", "GitHub Profile", &form.github_profile)
                            .input_type("url")
                            .placeholder("https://github.com/username"))
                    }
                    div class="col-md-6" {
                        (TextField::new("linkedin_profile", "LinkedIn Profile", &form.linkedin_profile)
                            .input_type("url")
                            .placeholder("https://linkedin.com/in/username"))
                    }
                }

                h4 class="h5 border-top border-secondary pt-4 mb-1" {
                    "Team Members"
                }
                p class="form-text mb-3" {
                    "Besides the leader, a team of N needs N - 1 member names."
                }
                @for (i, label) in member_labels.iter().enumerate().take(MAX_OTHER_MEMBERS) {
                    (TextField::new("team_members", label, form.member(i))
                        .id(["team_member_1", "team_member_2", "team_member_3"][i])
                        .placeholder("Member name"))
                }

                button type="submit" class="btn btn-primary w-100 py-2" {
                    "Register Team"
                }
            }
        }
        .render_to(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(team_size: &str, members: &[&str]) -> RegistrationForm {
        RegistrationForm {
            team_name: "Alpha".to_string(),
            team_size: team_size.to_string(),
            team_leader_name: "A. Lee".to_string(),
            team_leader_email: "a@x.com".to_string(),
            team_leader_phone: "9999999999".to_string(),
            team_members: members.iter().map(|m| m.to_string()).collect(),
            form_token: "token".to_string(),
            ..Default::default()
        }
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    #[test]
    fn succeeds_iff_enough_members_for_each_size() {
        let names = ["B", "C", "D"];
        for size in 2..=4usize {
            for provided in 0..=3usize {
                let mut members = names[..provided].to_vec();
                // pad with blanks, which never count
                members.resize(3, "  ");
                let result = form(&size.to_string(), &members).validate(now());

                if provided >= size - 1 {
                    let new = result.unwrap();
                    assert_eq!(new.team_size, size as i64);
                    assert_eq!(new.team_members.len(), size - 1);
                } else {
                    assert_eq!(
                        result.unwrap_err(),
                        ValidationError::NotEnoughMembers {
                            expected: size - 1,
                            provided
                        }
                    );
                }
            }
        }
    }

    #[test]
    fn sizes_outside_two_to_four_fail() {
        for size in ["0", "1", "5", "10", "", "four", "99999999999999999999"] {
            assert_eq!(
                form(size, &["B", "C", "D"]).validate(now()).unwrap_err(),
                ValidationError::TeamSizeOutOfRange,
                "size {size:?}"
            );
        }
    }

    #[test]
    fn team_size_ignores_non_digits() {
        assert_eq!(parse_team_size("3 Members"), Ok(3));
        assert_eq!(parse_team_size(" 4"), Ok(4));
    }

    #[test]
    fn any_single_missing_required_field_fails() {
        let blankers: [(&str, fn(&mut RegistrationForm)); 4] = [
            ("team_name", |f| f.team_name.clear()),
            ("team_leader_name", |f| f.team_leader_name = "  ".to_string()),
            ("team_leader_email", |f| f.team_leader_email.clear()),
            ("team_leader_phone", |f| f.team_leader_phone.clear()),
        ];

        for (field, blank) in blankers {
            let mut f = form("2", &["B"]);
            blank(&mut f);
            assert_eq!(
                f.validate(now()).unwrap_err(),
                ValidationError::MissingRequiredField(field)
            );
        }
    }

    #[test]
    fn members_are_trimmed_numbered_and_capped() {
        let new = form("3", &[" B ", "", "C", "D"]).validate(now()).unwrap();
        assert_eq!(
            new.team_members,
            vec![
                TeamMember {
                    name: "B".to_string(),
                    position: "Member 1".to_string()
                },
                TeamMember {
                    name: "C".to_string(),
                    position: "Member 2".to_string()
                },
            ]
        );
    }

    #[test]
    fn optional_fields_become_none_when_blank() {
        let mut f = form("2", &["B"]);
        f.institution = "  ".to_string();
        f.github_profile = "https://github.com/alee".to_string();
        let new = f.validate(now()).unwrap();
        assert_eq!(new.institution, None);
        assert_eq!(new.state, None);
        assert_eq!(
            new.github_profile.as_deref(),
            Some("https://github.com/alee")
        );
    }

    #[test]
    fn bad_email_and_profile_links_are_rejected() {
        let mut f = form("2", &["B"]);
        f.team_leader_email = "not-an-email".to_string();
        assert_eq!(f.validate(now()).unwrap_err(), ValidationError::InvalidEmail);

        let mut f = form("2", &["B"]);
        f.linkedin_profile = "linkedin".to_string();
        assert_eq!(
            f.validate(now()).unwrap_err(),
            ValidationError::InvalidProfileUrl("LinkedIn")
        );
    }

    #[test]
    fn form_page_keeps_entered_values() {
        let mut f = form("3", &["B", "C", ""]);
        f.team_name = "Alpha & Co".to_string();
        let html = render_registration_page(&f, Some("Please fill in all required fields"))
            .into_inner();

        assert!(html.contains("Alpha &amp; Co"));
        assert!(html.contains("Please fill in all required fields"));
        assert!(html.contains(r#"value="token""#));
        assert_eq!(html.matches(r#"name="team_members""#).count(), 3);
    }
}
