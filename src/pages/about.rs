use hypertext::prelude::*;

use crate::{
    template::{ActiveNav, Page},
    util_resp::{StandardResponse, success},
};

pub async fn about_page() -> StandardResponse {
    success(
        Page::new()
            .title("About")
            .active_nav(ActiveNav::About)
            .body(maud! {
                div class="container py-5" style="max-width: 860px;" {
                    h1 class="display-5 fw-bold text-center mb-4" { "About Skill Sprint" }
                    div class="glass-card p-4 p-md-5 mb-4" {
                        p class="lead" {
                            "Skill Sprint is a 2-day hackathon focused on building innovative "
                            "LMS (Learning Management System) platforms with specific company "
                            "constraints. It is organised by Hubexus and Tech Projects Hub, in "
                            "collaboration with the Department of AIML at Mohan Babu University, "
                            "The Coding Club and the Internship & Events Club."
                        }
                        p {
                            "The hackathon is open to anyone from any state in India. Teams "
                            "have 2 to 4 members, and accommodation is provided for participants "
                            "from other states with minimal charges."
                        }
                        p class="mb-0" {
                            "The top three teams win cash prizes together with compulsory "
                            "internships and placement assistance. Teams placing 4th to 10th are "
                            "offered interview-based internships, and every participant receives "
                            "a participation certificate."
                        }
                    }
                    div class="text-center" {
                        a class="btn btn-primary btn-lg px-4" href="/register" { "Register Now" }
                    }
                }
            })
            .render(),
    )
}
