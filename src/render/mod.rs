mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};

use crate::error::GanttResult;

/// Painting surface supplied by the host toolkit.
///
/// Grid and header frames are fully materialized before they reach a backend,
/// so backends only translate primitives into their own draw calls.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GanttResult<()>;
}
