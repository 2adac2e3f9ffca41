use hypertext::prelude::*;

/// A row of call-to-action buttons, given as `(link, text)` pairs.
pub struct Actions<'r> {
    pub options: &'r [(&'r str, &'r str)],
}

impl<'r> Renderable for Actions<'r> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            div class="d-flex flex-wrap justify-content-center gap-2 mt-4" {
                @for (link, text) in self.options {
                    a class="btn btn-primary px-4" href=(link) {
                        (text)
                    }
                }
            }
        }
        .render_to(buffer);
    }
}
