use axum_extra::extract::PrivateCookieJar;
use hypertext::prelude::*;

use crate::{
    funnel::handoff::{self, Handoff},
    template::Page,
    util_resp::{StandardResponse, success},
    widgets::{actions::Actions, celebration::Celebration},
};

const NEXT_STEPS: [&str; 4] = [
    "Your payment will be verified within 24 hours",
    "You'll receive a confirmation email once verified",
    "Problem statements will be released on September 23rd",
    "Join our WhatsApp group for updates",
];

pub async fn success_page(
    jar: PrivateCookieJar,
) -> (PrivateCookieJar, StandardResponse) {
    let (jar, handoff) = handoff::take_success(jar);
    let team_name = match handoff {
        Handoff::Present(handoff) => Some(handoff.team_name),
        Handoff::Missing => None,
    };

    (jar, success(render_success(team_name.as_deref())))
}

fn render_success(team_name: Option<&str>) -> Rendered<String> {
    Page::new()
        .title("Registration Complete")
        .body(maud! {
            div class="container py-5 text-center" style="max-width: 600px;" {
                div class="glass-card p-5" {
                    div class="success-check mx-auto mb-4" { "✓" }
                    h1 class="h3 fw-bold text-success mb-3" {
                        "Payment Submitted Successfully!"
                    }
                    p class="text-white-50" {
                        @if let Some(team_name) = team_name {
                            "Team " (team_name) " has been registered for Skill Sprint."
                        } @else {
                            "Your team has been registered for Skill Sprint."
                        }
                        br;
                        "Your payment screenshot has been submitted for verification."
                    }

                    div class="glass-card p-4 my-4 text-start" {
                        h2 class="h5 fw-semibold mb-3" { "What's Next?" }
                        ul class="mb-0" {
                            @for step in NEXT_STEPS {
                                li class="text-white-50 mb-1" { (step) }
                            }
                        }
                    }

                    Actions options=(&[("/", "Go to Home")]);
                }
            }
            (Celebration)
        })
        .render()
}
