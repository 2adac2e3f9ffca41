use hypertext::prelude::*;

/// Positions (left %, top %, size px, animation delay s) of the floating dots.
const PARTICLES: [(u8, u8, u8, u8); 12] = [
    (6, 12, 4, 0),
    (18, 64, 6, 3),
    (27, 30, 3, 7),
    (36, 82, 5, 1),
    (45, 18, 4, 9),
    (53, 55, 7, 4),
    (62, 8, 3, 11),
    (70, 72, 5, 2),
    (78, 40, 4, 6),
    (85, 90, 6, 10),
    (91, 24, 3, 5),
    (96, 60, 5, 8),
];

/// Fixed, decorative background drawn behind every page. Animated with CSS
/// only.
pub struct ParticlesBackground;

impl Renderable for ParticlesBackground {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            div class="particles" aria-hidden="true" {
                @for (left, top, size, delay) in PARTICLES {
                    span class="particle"
                        style=(format!(
                            "left: {left}%; top: {top}%; width: {size}px; height: {size}px; animation-delay: {delay}s;"
                        )) {}
                }
            }
        }
        .render_to(buffer);
    }
}
