//! The frequently asked questions accordion.
//!
//! At most one answer is open at a time. The state lives in the page URL
//! (`?faq=<index>`) and every question links to the state clicking it would
//! produce.

use hypertext::prelude::*;

pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQS: &[FaqItem] = &[
    FaqItem {
        question: "What is Skill Sprint?",
        answer: "Skill Sprint is a 2-day hackathon focused on building innovative LMS (Learning Management System) platforms with specific company constraints. It's organized by Hubexus and Tech Projects Hub.",
    },
    FaqItem {
        question: "Who can participate?",
        answer: "This hackathon is open to anyone from any state in India. Teams can have 2 to 4 members.",
    },
    FaqItem {
        question: "What is the hackathon theme?",
        answer: "The theme is LMS Platform Development with Company Constraints. You'll need to build learning management systems that meet specific business requirements.",
    },
    FaqItem {
        question: "What are the prizes?",
        answer: "1st Prize: ₹25,000, 2nd Prize: ₹15,000, 3rd Prize: ₹10,000. Top 3 teams also get compulsory internships and placement assistance. Teams 4th-10th get interview-based internships.",
    },
    FaqItem {
        question: "Is accommodation provided?",
        answer: "Yes, accommodation is provided for participants from other states with minimal charges.",
    },
    FaqItem {
        question: "When does registration close?",
        answer: "Registration opens on September 11th and closes on September 20th, 2025.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaqAccordion {
    pub open: Option<usize>,
}

impl FaqAccordion {
    /// Builds the state from the `faq` query parameter, ignoring anything
    /// which isn't the index of a question.
    pub fn from_query(faq: Option<&str>) -> Self {
        let open = faq
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|index| *index < FAQS.len());
        Self { open }
    }

    pub fn toggle(self, index: usize) -> Self {
        if index >= FAQS.len() {
            return self;
        }
        match self.open {
            Some(open) if open == index => Self { open: None },
            _ => Self { open: Some(index) },
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    fn link(&self) -> String {
        match self.open {
            Some(index) => format!("/?faq={index}#faq"),
            None => "/#faq".to_string(),
        }
    }
}

pub struct FaqSection {
    pub accordion: FaqAccordion,
}

impl Renderable for FaqSection {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            section id="faq" class="py-5" {
                div class="container" style="max-width: 760px;" {
                    h2 class="section-title text-center mb-5" {
                        "Frequently Asked Questions"
                    }
                    div class="list-group list-group-flush faq" {
                        @for (i, item) in FAQS.iter().enumerate() {
                            div class="list-group-item bg-transparent text-white px-0" {
                                a class="d-flex justify-content-between text-white text-decoration-none py-2 fs-5"
                                    href=(self.accordion.toggle(i).link())
                                {
                                    span { (item.question) }
                                    @if self.accordion.is_open(i) {
                                        span class="text-primary" aria-hidden="true" { "−" }
                                    } @else {
                                        span class="text-primary" aria-hidden="true" { "+" }
                                    }
                                }
                                @if self.accordion.is_open(i) {
                                    p class="faq-answer text-white-50 py-2 mb-0" {
                                        (item.answer)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        .render_to(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_most_one_item_is_open() {
        let accordion = FaqAccordion::default().toggle(0);
        assert!(accordion.is_open(0));

        let accordion = accordion.toggle(2);
        assert!(accordion.is_open(2));
        assert!(!accordion.is_open(0));
        assert_eq!(
            (0..FAQS.len()).filter(|i| accordion.is_open(*i)).count(),
            1
        );
    }

    #[test]
    fn clicking_open_item_closes_it() {
        let accordion = FaqAccordion::default().toggle(3).toggle(3);
        assert_eq!(accordion.open, None);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let accordion = FaqAccordion::default().toggle(1);
        assert_eq!(accordion.toggle(FAQS.len()), accordion);
        assert_eq!(FaqAccordion::from_query(Some("42")).open, None);
        assert_eq!(FaqAccordion::from_query(Some("x")).open, None);
        assert_eq!(FaqAccordion::from_query(Some("2")).open, Some(2));
    }

    #[test]
    fn renders_only_open_answer() {
        let html = FaqSection {
            accordion: FaqAccordion { open: Some(4) },
        }
        .render()
        .into_inner();

        assert_eq!(html.matches("faq-answer").count(), 1);
        assert!(html.contains("accommodation is provided"));
        // the open question links to the closed state
        assert!(html.contains(r#"href="/#faq""#));
    }
}
