use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer for tests and hosts that only consume geometry.
///
/// Frames are still validated so invalid geometry surfaces as an error.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_rect_count: usize,
    pub last_path_count: usize,
    pub last_circle_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_rect_count = frame.rects.len();
        self.last_path_count = frame.paths.len();
        self.last_circle_count = frame.circles.len();
        Ok(())
    }
}
