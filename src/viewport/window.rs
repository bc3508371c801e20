use crate::foundation::core::{CropRect, PixelSize, Point};

/// Which part of the source is on screen, and how magnified.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DisplayWindow {
    /// Visible source region; always inside the source and non-degenerate.
    pub crop: CropRect,
    /// Zoom factor, `1.0` shows the whole source.
    pub zoom_level: f64,
    /// Source point the crop is centred on.
    pub focal_point: Point,
}

impl DisplayWindow {
    /// Window showing all of a `size` source.
    pub fn full(size: PixelSize) -> Self {
        let crop = CropRect::full(size);
        Self {
            crop,
            zoom_level: 1.0,
            focal_point: crop.center().to_point(),
        }
    }

    /// Return `true` when the crop spans the whole of `size`.
    pub fn is_full(&self, size: PixelSize) -> bool {
        self.crop == CropRect::full(size)
    }
}
