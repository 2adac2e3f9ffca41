//! The presentational pages of the site. None of these touch storage.

use hypertext::prelude::*;

use crate::{
    template::Page,
    util_resp::{StandardResponse, err_not_found},
    widgets::actions::Actions,
};

pub mod about;
pub mod landing;
pub mod tracks;

pub async fn not_found() -> StandardResponse {
    err_not_found(
        Page::new()
            .title("Not Found")
            .body(maud! {
                div class="container py-5 text-center" style="max-width: 560px;" {
                    div class="glass-card p-5" {
                        h1 class="h2 fw-bold mb-3" { "Page not found" }
                        p class="text-white-50" {
                            "The page you were looking for does not exist."
                        }
                        Actions options=(&[("/", "Go to Home")]);
                    }
                }
            })
            .render(),
    )
}
