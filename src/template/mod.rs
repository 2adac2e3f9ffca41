//! Templating code.
//!
//! This defines the [`Page`] item, which every page of the site is wrapped
//! in: head, navigation bar, background decoration and footer.

use hypertext::{Raw, prelude::*};

use crate::widgets::particles::ParticlesBackground;

pub mod form;

/// Entries of the navigation bar.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActiveNav {
    Home,
    About,
    Tracks,
    Register,
}

pub struct Page<R1: Renderable, R2: Renderable> {
    body: Option<R1>,
    extra_head: Option<R2>,
    title: Option<String>,
    active_nav: Option<ActiveNav>,
}

// unfortunate generic argument shenanigans
impl<R1: Renderable> Page<R1, String> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<R1: Renderable, R2: Renderable> Page<R1, R2> {
    pub fn new_full() -> Self {
        Default::default()
    }
}

impl<R1: Renderable, R2: Renderable> Page<R1, R2> {
    pub fn body(mut self, body: R1) -> Self {
        self.body = Some(body);
        self
    }

    pub fn extra_head(mut self, content: R2) -> Page<R1, R2> {
        self.extra_head = Some(content);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn active_nav(mut self, nav: ActiveNav) -> Self {
        self.active_nav = Some(nav);
        self
    }

    fn nav_class(&self, nav: ActiveNav) -> &'static str {
        if self.active_nav == Some(nav) {
            "nav-link text-white active fw-semibold"
        } else {
            "nav-link text-white-50"
        }
    }

    fn register_class(&self) -> &'static str {
        if self.active_nav == Some(ActiveNav::Register) {
            "btn btn-light btn-sm active"
        } else {
            "btn btn-primary btn-sm"
        }
    }
}

impl<R1: Renderable, R2: Renderable> Renderable for Page<R1, R2> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        let title = match &self.title {
            Some(title) => format!("{title} | Skill Sprint"),
            None => "Skill Sprint".to_string(),
        };

        maud! {
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (title) }
                    link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet";
                    script src="https://cdn.jsdelivr.net/npm/htmx.org@2.0.7/dist/htmx.min.js" integrity="sha384-ZBXiYtYQ6hJ2Y0ZNoYuI+Nq5MqWBr+chMrS/RkXpNzQCApHEhOt2aY8EJgqwHLkJ" crossorigin="anonymous" {
                    }
                    style {
                        (Raw::dangerously_create(include_str!("../../assets/style.css")))
                    }
                    meta
                        name="viewport"
                        content="width=device-width, initial-scale=1";
                    @if let Some(extra) = &self.extra_head {
                        (extra)
                    }
                }
                body class="d-flex flex-column min-vh-100" data-bs-theme="dark" {
                    (ParticlesBackground)
                    nav class="navbar navbar-expand sticky-top site-nav" {
                        div class="container" {
                            a class="navbar-brand text-white fw-bold" href="/" {
                                span class="brand-mark me-2" { "</>" }
                                "Skill Sprint"
                            }
                            ul class="navbar-nav gap-3 align-items-center" {
                                li class="nav-item" {
                                    a class=(self.nav_class(ActiveNav::Home)) href="/" {
                                        "Home"
                                    }
                                }
                                li class="nav-item" {
                                    a class=(self.nav_class(ActiveNav::About)) href="/about" {
                                        "About"
                                    }
                                }
                                li class="nav-item" {
                                    a class=(self.nav_class(ActiveNav::Tracks)) href="/tracks" {
                                        "Tracks"
                                    }
                                }
                                li class="nav-item" {
                                    a class=(self.register_class()) href="/register" {
                                        "Register"
                                    }
                                }
                            }
                        }
                    }
                    main class="flex-grow-1 position-relative" {
                        @if let Some(body) = &self.body {
                            (body)
                        }
                    }
                    footer class="site-footer py-4 text-center text-white-50 small" {
                        p class="mb-1" {
                            "Skill Sprint is organised by Hubexus and Tech Projects Hub."
                        }
                        p class="mb-0" {
                            a class="link-light me-3" href="/about" { "About" }
                            a class="link-light me-3" href="/tracks" { "Tracks" }
                            a class="link-light" href="/register" { "Register" }
                        }
                    }
                }
            }
        }.render_to(buffer)
    }
}

impl<R1: Renderable, R2: Renderable> Default for Page<R1, R2> {
    fn default() -> Self {
        Self {
            body: Default::default(),
            extra_head: Default::default(),
            title: Default::default(),
            active_nav: Default::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_for(nav: ActiveNav) -> String {
        Page::new()
            .active_nav(nav)
            .body(maud! { p { "body" } })
            .render()
            .into_inner()
    }

    #[test]
    fn every_entry_marks_itself_active() {
        let home = page_for(ActiveNav::Home);
        assert!(home.contains(
            r#"<a class="nav-link text-white active fw-semibold" href="/">Home</a>"#
        ));
        assert!(home.contains(r#"class="btn btn-primary btn-sm" href="/register""#));

        let register = page_for(ActiveNav::Register);
        assert!(register.contains(r#"class="btn btn-light btn-sm active" href="/register""#));
        assert!(!register.contains("active fw-semibold"));

        let tracks = page_for(ActiveNav::Tracks);
        assert!(tracks.contains(
            r#"<a class="nav-link text-white active fw-semibold" href="/tracks">"#
        ));
        assert_eq!(tracks.matches("active fw-semibold").count(), 1);
    }
}
