/// Displayed size of the draw area
///
/// The image is drawn into an offscreen target that must match the area it
/// is displayed in. That area is the window minus the control strip, and
/// it is recomputed on every resize before the next redraw.

use iced::Size;

/// Height reserved for the slider and caption
pub const CONTROLS_HEIGHT: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    /// Draw area for a window of the given logical size, never smaller than 1x1
    pub fn from_window(window: Size) -> Self {
        let width = window.width.max(1.0).floor() as u32;
        let height = (window.height - CONTROLS_HEIGHT).max(1.0).floor() as u32;
        Self { width, height }
    }

    pub fn extent(self) -> (u32, u32) {
        (self.width, self.height)
    }
}
