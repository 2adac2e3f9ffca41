//! Form building blocks shared by the funnel pages.

use hypertext::prelude::*;

/// A labelled `<input>` in a Bootstrap `mb-3` group, refilled with `value`
/// when a submission is shown again after an error.
pub struct TextField<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub label: &'a str,
    pub value: &'a str,
    pub input_type: &'a str,
    pub placeholder: &'a str,
    pub required: bool,
}

impl<'a> TextField<'a> {
    pub fn new(name: &'a str, label: &'a str, value: &'a str) -> Self {
        Self {
            id: name,
            name,
            label,
            value,
            input_type: "text",
            placeholder: "",
            required: false,
        }
    }

    pub fn id(mut self, id: &'a str) -> Self {
        self.id = id;
        self
    }

    pub fn input_type(mut self, input_type: &'a str) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl Renderable for TextField<'_> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            div class="mb-3" {
                label for=(self.id) class="form-label" {
                    (self.label)
                    @if self.required {
                        " *"
                    }
                }
                @if self.required {
                    input
                        type=(self.input_type)
                        class="form-control"
                        id=(self.id)
                        name=(self.name)
                        value=(self.value)
                        placeholder=(self.placeholder)
                        required;
                } @else {
                    input
                        type=(self.input_type)
                        class="form-control"
                        id=(self.id)
                        name=(self.name)
                        value=(self.value)
                        placeholder=(self.placeholder);
                }
            }
        }
        .render_to(buffer);
    }
}
