use hypertext::prelude::*;

use crate::{
    template::{ActiveNav, Page},
    util_resp::{StandardResponse, success},
};

pub struct Track {
    pub title: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub tools: &'static [&'static str],
}

pub const TRACKS: [Track; 1] = [Track {
    title: "LMS Platform Development",
    summary: "Build comprehensive Learning Management Systems",
    description: "Create a full-featured LMS platform that addresses real-world \
                  educational needs. Your solution should include user management, \
                  course creation, assessment tools, progress tracking, and \
                  interactive learning features. Focus on scalability, user \
                  experience, and meeting specific company constraints that will be \
                  provided.",
    tools: &[
        "React/Vue/Angular",
        "Node.js/Django/Laravel",
        "PostgreSQL/MongoDB",
        "AWS/Azure",
        "Docker",
    ],
}];

pub async fn tracks_page() -> StandardResponse {
    success(
        Page::new()
            .title("Tracks")
            .active_nav(ActiveNav::Tracks)
            .body(maud! {
                div class="container py-5" style="max-width: 860px;" {
                    h1 class="display-5 fw-bold text-center mb-2" { "Hackathon Tracks" }
                    p class="text-center text-white-50 mb-5" {
                        "LMS Platform Development with Company Constraints"
                    }
                    @for track in &TRACKS {
                        div class="glass-card p-4 p-md-5 mb-4" {
                            h2 class="h3 fw-bold" { (track.title) }
                            p class="text-white-50" { (track.summary) }
                            p { (track.description) }

                            h3 class="h5 mt-4" { "Problem Statement" }
                            p class="text-white-50" {
                                "Detailed requirements and company constraints will be "
                                "released on September 23rd, 2025 at 6:00 PM"
                            }

                            h3 class="h5 mt-4" { "Recommended Tools" }
                            div class="d-flex flex-wrap gap-2 mb-4" {
                                @for tool in track.tools {
                                    span class="badge rounded-pill text-bg-secondary px-3 py-2" {
                                        (tool)
                                    }
                                }
                            }

                            a class="btn btn-primary" href="/register" {
                                "Register for Skill Sprint"
                            }
                        }
                    }
                }
            })
            .render(),
    )
}
