//! Fitting a crop rectangle into the canvas.

use crate::foundation::core::{PixelPoint, PixelSize};
use crate::foundation::math::half_floor;
use crate::viewport::window::DisplayWindow;

// Absorbs representation error in `crop * (canvas / crop)` before flooring.
const SIZE_EPS: f64 = 1e-9;

/// Uniform scale that fits `crop` inside `canvas`, preserving aspect ratio.
///
/// Values above `1.0` magnify (zoomed-in crops smaller than the canvas).
pub fn display_scale(crop: PixelSize, canvas: PixelSize) -> f64 {
    let sx = f64::from(canvas.width) / f64::from(crop.width.max(1));
    let sy = f64::from(canvas.height) / f64::from(crop.height.max(1));
    sx.min(sy)
}

/// Size of `crop` after scaling by `scale`, floored, at least one pixel per axis.
pub fn displayed_size(crop: PixelSize, scale: f64) -> PixelSize {
    let scaled = |v: u32| ((f64::from(v) * scale + SIZE_EPS).floor().max(1.0)) as u32;
    PixelSize {
        width: scaled(crop.width),
        height: scaled(crop.height),
    }
}

/// Top-left of a centred `displayed` bitmap inside `canvas` (floor division).
pub fn canvas_offset(canvas: PixelSize, displayed: PixelSize) -> PixelPoint {
    PixelPoint::new(
        half_floor(i64::from(canvas.width) - i64::from(displayed.width)),
        half_floor(i64::from(canvas.height) - i64::from(displayed.height)),
    )
}

/// Everything derived from one `(window, canvas)` pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewFit {
    /// Canvas the displayed image is centred in.
    pub canvas: PixelSize,
    /// Source-to-displayed scale.
    pub scale: f64,
    /// Size of the displayed image.
    pub displayed: PixelSize,
    /// Canvas position of the displayed image's top-left pixel.
    pub offset: PixelPoint,
}

impl ViewFit {
    /// Fit `window`'s crop into `canvas`.
    pub fn new(window: &DisplayWindow, canvas: PixelSize) -> Self {
        let scale = display_scale(window.crop.size(), canvas);
        let displayed = displayed_size(window.crop.size(), scale);
        Self {
            canvas,
            scale,
            displayed,
            offset: canvas_offset(canvas, displayed),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/fit.rs"]
mod tests;
