use std::collections::VecDeque;
use std::path::Path;

use image::{DynamicImage, GrayImage, RgbaImage};

use crate::assets::decode::SourceImage;
use crate::assets::io::{FsImageIo, ImageIo};
use crate::effects::composite::compose;
use crate::effects::resample::displayed_image;
use crate::foundation::core::{PixelPoint, PixelSize, Point, Vec2};
use crate::foundation::error::{BgcutError, BgcutResult};
use crate::mask::bits::RetentionMask;
use crate::mask::store::MaskStore;
use crate::session::gesture::{GestureEvent, PointerButton};
use crate::session::opts::SessionOpts;
use crate::session::target::{InMemoryTarget, Pane, Placement, RenderTarget};
use crate::transform::coords::{canvas_to_displayed, canvas_to_source_with};
use crate::transform::fit::ViewFit;
use crate::viewport::controller::ViewportController;
use crate::viewport::window::DisplayWindow;

/// Bitmaps derived from the session state for the current canvas.
#[derive(Clone, Debug)]
pub struct DerivedViews {
    /// How the crop fits the canvas.
    pub fit: ViewFit,
    /// Source crop scaled to the canvas.
    pub displayed: RgbaImage,
    /// Mask crop scaled to the canvas; protected pixels black.
    pub mask_view: GrayImage,
    /// `displayed` with background removal applied.
    pub preview: RgbaImage,
}

/// Where a canvas position lands in each coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CoordinateReadout {
    /// Position on the canvas.
    pub canvas: Point,
    /// Canvas position of the displayed image's top-left pixel.
    pub image_offset: PixelPoint,
    /// Position in the displayed image, when over it.
    pub displayed: Option<Point>,
    /// Source pixel under the position, when over the displayed image.
    pub source: Option<PixelPoint>,
    /// Current zoom level.
    pub zoom_level: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Drag {
    Idle,
    Painting { last: Point },
    Panning { last: Point },
}

// Source, mask and viewport are created and replaced together.
#[derive(Debug)]
struct Document {
    source: SourceImage,
    mask: MaskStore,
    viewport: ViewportController,
}

/// One interactive background-removal session.
///
/// Owns the loaded image, its retention mask and the viewport, and turns [`GestureEvent`]s into
/// edits. Every mutation re-renders both panes before returning, so presented views are never
/// stale. Pointer input that arrives before the canvas is laid out is queued and replayed in
/// order once it is.
#[derive(Debug)]
pub struct EditSession<T: RenderTarget, I: ImageIo = FsImageIo> {
    opts: SessionOpts,
    target: T,
    io: I,
    threshold: u8,
    doc: Option<Document>,
    views: Option<DerivedViews>,
    drag: Drag,
    pending: VecDeque<GestureEvent>,
    processed: Option<RgbaImage>,
}

impl EditSession<InMemoryTarget, FsImageIo> {
    /// Session without a window: frames are kept in memory, files go through the filesystem.
    pub fn headless(opts: SessionOpts, canvas: PixelSize) -> Self {
        Self::new(opts, InMemoryTarget::new(Some(canvas)).latest_only(), FsImageIo)
    }
}

impl<T: RenderTarget, I: ImageIo> EditSession<T, I> {
    /// Empty session presenting to `target` and loading/saving through `io`.
    pub fn new(opts: SessionOpts, target: T, io: I) -> Self {
        Self {
            threshold: opts.threshold,
            opts,
            target,
            io,
            doc: None,
            views: None,
            drag: Drag::Idle,
            pending: VecDeque::new(),
            processed: None,
        }
    }

    /// Session options.
    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// Mutable session options; mask policy changes apply from the next load.
    pub fn opts_mut(&mut self) -> &mut SessionOpts {
        &mut self.opts
    }

    /// Presentation target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutable presentation target.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Current brightness threshold.
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Loaded source image.
    pub fn source(&self) -> Option<&SourceImage> {
        self.doc.as_ref().map(|d| &d.source)
    }

    /// Full-resolution retention mask.
    pub fn mask(&self) -> Option<&RetentionMask> {
        self.doc.as_ref().map(|d| d.mask.mask())
    }

    /// Current display window.
    pub fn window(&self) -> Option<&DisplayWindow> {
        self.doc.as_ref().map(|d| d.viewport.window())
    }

    /// Views from the last render, `None` before the first render or while the canvas is
    /// not laid out.
    pub fn views(&self) -> Option<&DerivedViews> {
        self.views.as_ref()
    }

    /// Last full-resolution result produced by [`EditSession::save`].
    pub fn processed(&self) -> Option<&RgbaImage> {
        self.processed.as_ref()
    }

    /// Number of queued pointer events waiting for a canvas.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Load an image from `path` and start a fresh document.
    ///
    /// On failure the current document is left untouched.
    pub fn open(&mut self, path: &Path) -> BgcutResult<()> {
        let source = self.io.load(path).inspect_err(|e| {
            tracing::warn!(error = %e, path = %path.display(), "open failed");
        })?;
        tracing::info!(
            path = %path.display(),
            width = source.size().width,
            height = source.size().height,
            "image opened"
        );
        self.load_image(source)
    }

    /// Replace the document with `source`, a fresh mask and a full-extent window.
    pub fn load_image(&mut self, source: SourceImage) -> BgcutResult<()> {
        let mask = MaskStore::initialize(source.pixels(), self.opts.mask_init, self.threshold);
        let viewport = ViewportController::new(source.size(), self.opts.max_zoom);
        self.doc = Some(Document {
            source,
            mask,
            viewport,
        });
        self.drag = Drag::Idle;
        self.pending.clear();
        self.processed = None;
        self.rerender()
    }

    /// Handle one input event.
    pub fn handle(&mut self, event: GestureEvent) -> BgcutResult<()> {
        match event {
            GestureEvent::ThresholdChanged { value } => return self.set_threshold(value),
            GestureEvent::ThresholdEntered { ref text } => return self.enter_threshold(text),
            _ => {}
        }

        let Some(canvas) = self.target.canvas_size() else {
            tracing::debug!(?event, "canvas not laid out, deferring");
            self.pending.push_back(event);
            return Ok(());
        };
        self.flush_pending_with(canvas)?;
        self.apply_pointer(event, canvas)
    }

    /// Replay queued pointer events if the canvas is now laid out; returns how many ran.
    pub fn flush_pending(&mut self) -> BgcutResult<usize> {
        match self.target.canvas_size() {
            Some(canvas) => self.flush_pending_with(canvas),
            None => Ok(0),
        }
    }

    /// Set the threshold from the slider.
    pub fn set_threshold(&mut self, value: u8) -> BgcutResult<()> {
        self.threshold = value;
        self.rerender()
    }

    /// Set the threshold from typed text.
    ///
    /// Integers are clamped into `0..=255`; anything else is rejected and the threshold is
    /// left unchanged.
    pub fn enter_threshold(&mut self, text: &str) -> BgcutResult<()> {
        let value: i64 = text.trim().parse().map_err(|_| {
            tracing::warn!(text, "threshold entry is not an integer");
            BgcutError::invalid_input(format!("threshold must be an integer, got '{text}'"))
        })?;
        self.set_threshold(value.clamp(0, 255) as u8)
    }

    /// Compose the full-resolution result and write it to `path`.
    ///
    /// The result is kept even when writing fails, so [`EditSession::retry_save`] can try
    /// another path without recomputing.
    #[tracing::instrument(skip(self))]
    pub fn save(&mut self, path: &Path) -> BgcutResult<()> {
        let Some(doc) = self.doc.as_ref() else {
            tracing::warn!("save requested with no image loaded");
            return Err(BgcutError::NoImageLoaded);
        };
        let processed = compose(doc.source.pixels(), doc.mask.mask(), self.threshold)?;
        self.processed = Some(processed);
        self.retry_save(path)
    }

    /// Write the last processed result again, to `path`.
    pub fn retry_save(&self, path: &Path) -> BgcutResult<()> {
        let Some(image) = self.processed.as_ref() else {
            return Err(BgcutError::NoImageLoaded);
        };
        self.io.save(image, path).inspect_err(|e| {
            tracing::warn!(error = %e, path = %path.display(), "save failed");
        })?;
        tracing::info!(path = %path.display(), "image saved");
        Ok(())
    }

    /// Coordinates of a canvas position in every space.
    pub fn probe(&self, canvas_point: Point) -> Option<CoordinateReadout> {
        let doc = self.doc.as_ref()?;
        let canvas = self.target.canvas_size()?;
        let window = doc.viewport.window();
        let fit = ViewFit::new(window, canvas);
        Some(CoordinateReadout {
            canvas: canvas_point,
            image_offset: fit.offset,
            displayed: canvas_to_displayed(canvas_point, canvas, fit.displayed),
            source: canvas_to_source_with(canvas_point, &fit, window),
            zoom_level: window.zoom_level,
        })
    }

    /// Recompute the displayed crop, mask view and preview, and present both panes.
    ///
    /// Without a document or a laid-out canvas the cached views are dropped.
    pub fn rerender(&mut self) -> BgcutResult<()> {
        let (Some(doc), Some(canvas)) = (self.doc.as_ref(), self.target.canvas_size()) else {
            self.views = None;
            return Ok(());
        };
        let window = doc.viewport.window();
        let fit = ViewFit::new(window, canvas);
        let displayed = displayed_image(doc.source.pixels(), window, fit.displayed);
        let mask_crop = doc.mask.crop_scaled(window, fit.scale);
        let preview = compose(&displayed, &mask_crop, self.threshold)?;
        let mask_view = mask_crop.to_gray();

        let placement = Placement {
            offset: fit.offset,
            size: fit.displayed,
        };
        self.target.present(
            Pane::Preview,
            &DynamicImage::ImageRgba8(preview.clone()),
            placement,
        );
        self.target.present(
            Pane::Mask,
            &DynamicImage::ImageLuma8(mask_view.clone()),
            placement,
        );
        self.views = Some(DerivedViews {
            fit,
            displayed,
            mask_view,
            preview,
        });
        Ok(())
    }

    fn flush_pending_with(&mut self, canvas: PixelSize) -> BgcutResult<usize> {
        if self.views.as_ref().is_none_or(|v| v.fit.canvas != canvas) {
            self.rerender()?;
        }
        let mut ran = 0usize;
        while let Some(event) = self.pending.pop_front() {
            self.apply_pointer(event, canvas)?;
            ran += 1;
        }
        Ok(ran)
    }

    fn apply_pointer(&mut self, event: GestureEvent, canvas: PixelSize) -> BgcutResult<()> {
        match event {
            GestureEvent::PointerDown { x, y, button } => {
                let p = Point::new(x, y);
                match button {
                    PointerButton::Primary => {
                        self.drag = Drag::Painting { last: p };
                        self.paint(p, p, canvas)
                    }
                    PointerButton::Secondary => {
                        self.drag = Drag::Panning { last: p };
                        Ok(())
                    }
                }
            }
            GestureEvent::PointerDrag { x, y, button } => {
                let p = Point::new(x, y);
                match (button, self.drag) {
                    (PointerButton::Primary, Drag::Painting { last }) => {
                        self.drag = Drag::Painting { last: p };
                        self.paint(last, p, canvas)
                    }
                    (PointerButton::Primary, _) => {
                        self.drag = Drag::Painting { last: p };
                        self.paint(p, p, canvas)
                    }
                    (PointerButton::Secondary, Drag::Panning { last }) => {
                        self.drag = Drag::Panning { last: p };
                        self.pan(last - p)
                    }
                    (PointerButton::Secondary, _) => {
                        self.drag = Drag::Panning { last: p };
                        Ok(())
                    }
                }
            }
            GestureEvent::PointerUp { .. } => {
                self.drag = Drag::Idle;
                Ok(())
            }
            GestureEvent::Wheel { x, y, delta } => self.wheel(Point::new(x, y), delta, canvas),
            GestureEvent::ThresholdChanged { .. } | GestureEvent::ThresholdEntered { .. } => {
                Ok(())
            }
        }
    }

    fn paint(&mut self, from: Point, to: Point, canvas: PixelSize) -> BgcutResult<()> {
        let Some(doc) = self.doc.as_mut() else {
            return Ok(());
        };
        let window = *doc.viewport.window();
        let fit = ViewFit::new(&window, canvas);
        let (a, b) = match (
            canvas_to_source_with(from, &fit, &window),
            canvas_to_source_with(to, &fit, &window),
        ) {
            (Some(a), Some(b)) => (a, b),
            (None, Some(b)) => (b, b),
            (_, None) => return Ok(()),
        };
        let changed = doc
            .mask
            .paint_stroke(a, b, self.opts.brush_width, self.opts.brush.bit());
        tracing::debug!(from = ?a, to = ?b, changed, "stroke painted");
        if changed == 0 {
            return Ok(());
        }
        self.rerender()
    }

    fn pan(&mut self, canvas_delta: Vec2) -> BgcutResult<()> {
        let Some(doc) = self.doc.as_mut() else {
            return Ok(());
        };
        doc.viewport.pan(canvas_delta);
        self.rerender()
    }

    fn wheel(&mut self, at: Point, delta: f64, canvas: PixelSize) -> BgcutResult<()> {
        if delta == 0.0 || !delta.is_finite() {
            return Ok(());
        }
        let Some(doc) = self.doc.as_mut() else {
            return Ok(());
        };
        doc.viewport
            .zoom(delta.signum() * self.opts.zoom_step, at, canvas);
        self.rerender()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/edit_session.rs"]
mod tests;
