use image::DynamicImage;

use crate::foundation::core::{PixelPoint, PixelSize};

/// Canvas a bitmap is presented on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pane {
    /// Source crop with background removal applied.
    Preview,
    /// Mask crop; protected pixels black.
    Mask,
}

/// Where a bitmap goes on its canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Placement {
    /// Canvas position of the bitmap's top-left pixel.
    pub offset: PixelPoint,
    /// Bitmap size.
    pub size: PixelSize,
}

/// Presentation surface for an edit session.
///
/// Both panes share one canvas size. `None` means the canvas is not laid out yet; the
/// session defers pointer input until it is.
pub trait RenderTarget {
    /// Current canvas size, if known.
    fn canvas_size(&self) -> Option<PixelSize>;
    /// Show `bitmap` on `pane`, replacing whatever was there.
    fn present(&mut self, pane: Pane, bitmap: &DynamicImage, placement: Placement);
}

/// One recorded [`RenderTarget::present`] call.
#[derive(Clone, Debug)]
pub struct PresentedFrame {
    /// Destination pane.
    pub pane: Pane,
    /// Placement on the canvas.
    pub placement: Placement,
    /// Presented pixels.
    pub bitmap: DynamicImage,
}

/// [`RenderTarget`] that records frames in memory, for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTarget {
    canvas: Option<PixelSize>,
    frames: Vec<PresentedFrame>,
    latest_only: bool,
}

impl InMemoryTarget {
    /// Target with a fixed canvas, or an unlaid-out one for `None`.
    pub fn new(canvas: Option<PixelSize>) -> Self {
        Self {
            canvas,
            frames: Vec::new(),
            latest_only: false,
        }
    }

    /// Keep only the most recent frame per pane instead of the full history.
    pub fn latest_only(mut self) -> Self {
        self.latest_only = true;
        self
    }

    /// Simulate a layout change.
    pub fn set_canvas(&mut self, canvas: Option<PixelSize>) {
        self.canvas = canvas;
    }

    /// All presented frames, oldest first.
    pub fn frames(&self) -> &[PresentedFrame] {
        &self.frames
    }

    /// Most recent frame presented on `pane`.
    pub fn last(&self, pane: Pane) -> Option<&PresentedFrame> {
        self.frames.iter().rev().find(|f| f.pane == pane)
    }

    /// Forget recorded frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl RenderTarget for InMemoryTarget {
    fn canvas_size(&self) -> Option<PixelSize> {
        self.canvas
    }

    fn present(&mut self, pane: Pane, bitmap: &DynamicImage, placement: Placement) {
        if self.latest_only {
            self.frames.retain(|f| f.pane != pane);
        }
        self.frames.push(PresentedFrame {
            pane,
            placement,
            bitmap: bitmap.clone(),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/target.rs"]
mod tests;
