//! Conversions between canvas, displayed-image and source coordinates.
//!
//! Three spaces are involved:
//!
//! - **canvas**: pixels of the on-screen widget, origin at its top-left;
//! - **displayed**: pixels of the crop after scaling, centred in the canvas;
//! - **source**: pixels of the full-resolution image.
//!
//! Every function takes its context explicitly. Continuous functions work on [`Point`] so each
//! is the exact inverse of its companion; rounding to pixels happens only in
//! [`canvas_to_source`].

use crate::foundation::core::{PixelPoint, PixelSize, Point};
use crate::transform::fit::{ViewFit, canvas_offset};
use crate::viewport::window::DisplayWindow;

/// Canvas point to displayed-image point, or `None` outside `[0, w) x [0, h)`.
pub fn canvas_to_displayed(p: Point, canvas: PixelSize, displayed: PixelSize) -> Option<Point> {
    let off = canvas_offset(canvas, displayed);
    let d = Point::new(p.x - off.x as f64, p.y - off.y as f64);
    let inside = d.x >= 0.0
        && d.y >= 0.0
        && d.x < f64::from(displayed.width)
        && d.y < f64::from(displayed.height);
    inside.then_some(d)
}

/// Inverse of [`canvas_to_displayed`] (no range check).
pub fn displayed_to_canvas(p: Point, canvas: PixelSize, displayed: PixelSize) -> Point {
    let off = canvas_offset(canvas, displayed);
    Point::new(p.x + off.x as f64, p.y + off.y as f64)
}

/// Displayed-image point to source point.
pub fn displayed_to_source(p: Point, window: &DisplayWindow, scale: f64) -> Point {
    Point::new(
        p.x / scale + f64::from(window.crop.left),
        p.y / scale + f64::from(window.crop.upper),
    )
}

/// Source point to displayed-image point.
pub fn source_to_displayed(p: Point, window: &DisplayWindow, scale: f64) -> Point {
    Point::new(
        (p.x - f64::from(window.crop.left)) * scale,
        (p.y - f64::from(window.crop.upper)) * scale,
    )
}

/// Canvas point to the source pixel under it.
///
/// Returns `None` when the point is outside the displayed image. The displayed point is
/// clamped into `[0, w] x [0, h]` and the resulting pixel into the crop rectangle, so drags
/// that leave the image still land on its edge.
pub fn canvas_to_source(
    p: Point,
    canvas: PixelSize,
    window: &DisplayWindow,
) -> Option<PixelPoint> {
    let fit = ViewFit::new(window, canvas);
    canvas_to_source_with(p, &fit, window)
}

/// [`canvas_to_source`] with a precomputed fit.
pub fn canvas_to_source_with(
    p: Point,
    fit: &ViewFit,
    window: &DisplayWindow,
) -> Option<PixelPoint> {
    let d = canvas_to_displayed(p, fit.canvas, fit.displayed)?;
    let d = Point::new(
        d.x.clamp(0.0, f64::from(fit.displayed.width)),
        d.y.clamp(0.0, f64::from(fit.displayed.height)),
    );
    let s = PixelPoint::floor(displayed_to_source(d, window, fit.scale));
    let crop = window.crop;
    Some(PixelPoint::new(
        s.x.clamp(i64::from(crop.left), i64::from(crop.right) - 1),
        s.y.clamp(i64::from(crop.upper), i64::from(crop.lower) - 1),
    ))
}

/// Source point to canvas point (continuous).
pub fn source_to_canvas(p: Point, fit: &ViewFit, window: &DisplayWindow) -> Point {
    displayed_to_canvas(source_to_displayed(p, window, fit.scale), fit.canvas, fit.displayed)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/coords.rs"]
mod tests;
