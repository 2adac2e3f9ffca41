use axum::extract::{Query, State};
use chrono::Utc;
use hypertext::prelude::*;
use serde::Deserialize;

use crate::{
    state::AppState,
    template::{ActiveNav, Page},
    util_resp::{StandardResponse, success},
    widgets::{
        countdown::{Countdown, remaining},
        faq::{FaqAccordion, FaqSection},
    },
};

pub struct Milestone {
    pub title: &'static str,
    pub date: &'static str,
    pub time: &'static str,
}

pub const TIMELINE: [Milestone; 4] = [
    Milestone {
        title: "Registration Opens",
        date: "September 11, 2025",
        time: "12:00 AM",
    },
    Milestone {
        title: "Registration Closes",
        date: "September 20, 2025",
        time: "11:59 PM",
    },
    Milestone {
        title: "Hackathon Kickoff",
        date: "September 24, 2025",
        time: "9:00 AM",
    },
    Milestone {
        title: "Winners Announcement",
        date: "September 25, 2025",
        time: "6:00 PM",
    },
];

pub struct Prize {
    pub place: &'static str,
    pub amount: &'static str,
    pub extras: [&'static str; 2],
}

pub const PRIZES: [Prize; 3] = [
    Prize {
        place: "1st",
        amount: "₹25,000",
        extras: ["Compulsory Internship", "Placement Assistance"],
    },
    Prize {
        place: "2nd",
        amount: "₹15,000",
        extras: ["Compulsory Internship", "Placement Assistance"],
    },
    Prize {
        place: "3rd",
        amount: "₹10,000",
        extras: ["Compulsory Internship", "Placement Assistance"],
    },
];

pub struct Partner {
    pub name: &'static str,
    pub description: &'static str,
}

pub const PARTNERS: [Partner; 5] = [
    Partner {
        name: "Hubexus",
        description: "Leading technology solutions provider",
    },
    Partner {
        name: "Tech Projects Hub",
        description: "Innovation and project development platform",
    },
    Partner {
        name: "Department of AIML",
        description: "Mohan Babu University",
    },
    Partner {
        name: "The Coding Club",
        description: "Student technology community",
    },
    Partner {
        name: "Internship & Events Club",
        description: "Career development and events organization",
    },
];

#[derive(Deserialize, Debug, Default)]
pub struct LandingQuery {
    #[serde(default)]
    pub faq: Option<String>,
}

pub async fn landing_page(
    State(state): State<AppState>,
    Query(query): Query<LandingQuery>,
) -> StandardResponse {
    let countdown = Countdown {
        remaining: remaining(Utc::now(), state.event.starts_at_utc()),
    };
    let faq = FaqSection {
        accordion: FaqAccordion::from_query(query.faq.as_deref()),
    };

    success(
        Page::new()
            .active_nav(ActiveNav::Home)
            .body(maud! {
                header class="hero text-center py-5" {
                    div class="container py-5" {
                        span class="badge rounded-pill hero-badge mb-4" {
                            "Hubexus & Tech Projects Hub present"
                        }
                        h1 class="display-2 fw-bold hero-title" { "SKILL SPRINT" }
                        h2 class="h3 text-white-50 mb-3" {
                            "LMS Platform Development Challenge"
                        }

                        (countdown)

                        div class="d-flex flex-wrap justify-content-center gap-3 mb-4" {
                            span class="glass-card px-3 py-2" { "📅 September 24-25, 2025" }
                            span class="glass-card px-3 py-2" { "📍 Open for All States" }
                        }
                        div class="d-flex flex-wrap justify-content-center gap-3" {
                            a class="btn btn-primary btn-lg px-4" href="/register" {
                                "Register Now"
                            }
                            a class="btn btn-outline-light btn-lg px-4" href="/tracks" {
                                "Explore Tracks"
                            }
                            a class="btn btn-outline-light btn-lg px-4" href="/about" {
                                "About Us"
                            }
                        }
                    }
                }

                section class="py-5" {
                    div class="container" style="max-width: 860px;" {
                        h2 class="section-title text-center mb-5" { "Event Timeline" }
                        ol class="timeline list-unstyled" {
                            @for milestone in &TIMELINE {
                                li class="timeline-item glass-card p-3 mb-3" {
                                    h3 class="h5 fw-semibold mb-1" { (milestone.title) }
                                    p class="text-white-50 mb-0" {
                                        (milestone.date) " · " (milestone.time)
                                    }
                                }
                            }
                        }
                    }
                }

                section class="py-5" {
                    div class="container" {
                        h2 class="section-title text-center mb-5" { "Prizes" }
                        div class="row g-4 justify-content-center" {
                            @for prize in &PRIZES {
                                div class="col-md-4" {
                                    div class="glass-card prize-card text-center p-4 h-100" {
                                        div class="text-white-50 text-uppercase small" {
                                            (prize.place) " Place"
                                        }
                                        div class="display-6 fw-bold my-2" { (prize.amount) }
                                        ul class="list-unstyled mb-0" {
                                            @for extra in prize.extras {
                                                li class="small" { "★ " (extra) }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        div class="row g-4 justify-content-center mt-2" {
                            div class="col-md-4" {
                                div class="glass-card text-center p-4 h-100" {
                                    h3 class="h5" { "Teams 4th-10th" }
                                    p class="small text-white-50 mb-0" {
                                        "Interview-based Internship · Appreciation Certificate"
                                    }
                                }
                            }
                            div class="col-md-4" {
                                div class="glass-card text-center p-4 h-100" {
                                    h3 class="h5" { "All Participants" }
                                    p class="small text-white-50 mb-0" {
                                        "Participation Certificate · Learning Experience"
                                    }
                                }
                            }
                            div class="col-md-4" {
                                div class="glass-card text-center p-4 h-100" {
                                    h3 class="h5" { "Accommodation Available" }
                                    p class="small text-white-50 mb-0" {
                                        "Provided for participants from other states with minimal charges"
                                    }
                                }
                            }
                        }
                    }
                }

                section class="py-5" {
                    div class="container" {
                        h2 class="section-title text-center mb-5" { "In Collaboration With" }
                        div class="row g-4 justify-content-center" {
                            @for partner in &PARTNERS {
                                div class="col-6 col-md-4 col-lg-2" {
                                    div class="glass-card partner-card text-center p-3 h-100" {
                                        h3 class="h6 fw-semibold" { (partner.name) }
                                        p class="small text-white-50 mb-0" {
                                            (partner.description)
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                (faq)

                section class="py-5 text-center" {
                    div class="container" {
                        h2 class="h3 fw-bold" { "Ready to Join Skill Sprint?" }
                        p class="text-white-50" {
                            "Build innovative LMS platforms and compete for amazing prizes!"
                        }
                        a class="btn btn-primary btn-lg px-4" href="/register" { "Register Now" }
                    }
                }
            })
            .render(),
    )
}

/// The countdown on its own, for the widget's once-a-second refresh.
pub async fn countdown_fragment(State(state): State<AppState>) -> StandardResponse {
    success(
        Countdown {
            remaining: remaining(Utc::now(), state.event.starts_at_utc()),
        }
        .render(),
    )
}
