use crate::foundation::core::{CropRect, PixelSize, Point, Vec2};
use crate::foundation::math::snap_to;
use crate::transform::coords::canvas_to_source_with;
use crate::transform::fit::ViewFit;
use crate::viewport::window::DisplayWindow;

/// Lowest zoom level; shows the whole source.
pub const MIN_ZOOM: f64 = 1.0;
/// Default upper zoom limit.
pub const DEFAULT_MAX_ZOOM: f64 = 25.0;

// Accumulated wheel steps (1.0 + 0.1 - 0.1 ...) must land back on exactly 1.0.
const ZOOM_EPS: f64 = 1e-9;

/// Owns the [`DisplayWindow`] over one source image and derives new crops for zoom and pan.
///
/// Every operation leaves the crop inside the source and non-degenerate. Overflow is absorbed
/// by moving the crop back inside, then by shrinking it; coordinates never go negative.
#[derive(Clone, Debug)]
pub struct ViewportController {
    source: PixelSize,
    max_zoom: f64,
    window: DisplayWindow,
}

impl ViewportController {
    /// Controller showing all of a `source`-sized image.
    pub fn new(source: PixelSize, max_zoom: f64) -> Self {
        Self {
            source,
            max_zoom: max_zoom.max(MIN_ZOOM),
            window: DisplayWindow::full(source),
        }
    }

    /// Current window.
    pub fn window(&self) -> &DisplayWindow {
        &self.window
    }

    /// Size of the source image the window is over.
    pub fn source_size(&self) -> PixelSize {
        self.source
    }

    /// Current zoom level.
    pub fn zoom_level(&self) -> f64 {
        self.window.zoom_level
    }

    /// Fit of the current crop into `canvas`.
    pub fn fit(&self, canvas: PixelSize) -> ViewFit {
        ViewFit::new(&self.window, canvas)
    }

    /// Show the whole of a (possibly new) source at zoom `1.0`.
    pub fn reset(&mut self, source: PixelSize) {
        self.source = source;
        self.window = DisplayWindow::full(source);
    }

    /// Zoom by `delta` around the source pixel under `focal` on the canvas.
    ///
    /// Points outside the displayed image keep the current focal point.
    #[tracing::instrument(skip(self))]
    pub fn zoom(&mut self, delta: f64, focal: Point, canvas: PixelSize) -> &DisplayWindow {
        let fit = self.fit(canvas);
        let focal = canvas_to_source_with(focal, &fit, &self.window)
            .map(|p| p.to_point())
            .unwrap_or(self.window.focal_point);
        self.zoom_at_source(delta, focal)
    }

    /// Zoom by `delta` and centre the crop on `focal`, a source-space point.
    ///
    /// Level `1.0` always yields the exact full extent. Otherwise the focal point is replaced
    /// by the clamped crop's own centre, so `zoom_at_source(0.0, fp)` is idempotent.
    pub fn zoom_at_source(&mut self, delta: f64, focal: Point) -> &DisplayWindow {
        let delta = if delta.is_finite() { delta } else { 0.0 };
        let focal = if focal.x.is_finite() && focal.y.is_finite() {
            focal
        } else {
            self.window.focal_point
        };

        let level = snap_to(
            (self.window.zoom_level + delta).clamp(MIN_ZOOM, self.max_zoom),
            MIN_ZOOM,
            ZOOM_EPS,
        );
        if level == MIN_ZOOM {
            self.window = DisplayWindow::full(self.source);
            tracing::debug!(crop = ?self.window.crop.as_tuple(), "viewport reset to full extent");
            return &self.window;
        }

        let crop_w = crop_extent(self.source.width, level);
        let crop_h = crop_extent(self.source.height, level);
        let left = crop_origin(focal.x, crop_w, self.source.width);
        let upper = crop_origin(focal.y, crop_h, self.source.height);
        let crop = CropRect {
            left,
            upper,
            right: left + crop_w,
            lower: upper + crop_h,
        };

        self.window = DisplayWindow {
            crop,
            zoom_level: level,
            focal_point: crop.center().to_point(),
        };
        tracing::debug!(level, crop = ?crop.as_tuple(), "viewport crop updated");
        &self.window
    }

    /// Move the focal point by `canvas_delta` scaled by the zoom level, then re-clamp.
    pub fn pan(&mut self, canvas_delta: Vec2) -> &DisplayWindow {
        let focal = self.window.focal_point + canvas_delta * self.window.zoom_level;
        self.zoom_at_source(0.0, focal)
    }
}

/// `floor(full / level)` clamped into `[1, full]`.
fn crop_extent(full: u32, level: f64) -> u32 {
    let extent = (f64::from(full) / level).floor();
    (extent.max(1.0) as u32).min(full.max(1))
}

/// Left/top edge of an `extent`-wide crop centred on `center`, kept inside `[0, full]`.
fn crop_origin(center: f64, extent: u32, full: u32) -> u32 {
    let start = center.floor() as i64 - i64::from(extent / 2);
    start.clamp(0, i64::from(full.saturating_sub(extent))) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/controller.rs"]
mod tests;
