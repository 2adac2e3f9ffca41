use hypertext::{Raw, prelude::*};

/// One burst of confetti, fired when the page has loaded.
pub struct Celebration;

impl Renderable for Celebration {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            script src="https://cdn.jsdelivr.net/npm/canvas-confetti@1.9.3/dist/confetti.browser.min.js" {}
            script data-effect="celebration" {
                (Raw::dangerously_create(
                    "window.addEventListener('load', function () {\
                        if (typeof confetti === 'function') {\
                            confetti({ particleCount: 150, spread: 70, origin: { y: 0.6 } });\
                        }\
                    });"
                ))
            }
        }
        .render_to(buffer);
    }
}
