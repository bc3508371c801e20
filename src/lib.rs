//! bgcut is a mask-guided background remover.
//!
//! A loaded image gets a full-resolution retention mask. Protected pixels are never altered;
//! every other pixel whose channels all exceed a brightness threshold becomes transparent.
//! The user refines the mask with brush strokes while zooming and panning a viewport, and
//! the result is saved at full resolution.
//!
//! # Layers
//!
//! 1. **Transform**: pure mappings between canvas, displayed-image and source coordinates.
//! 2. **Viewport**: zoom level, focal point and the crop rectangle derived from them.
//! 3. **Mask**: the bit-packed [`RetentionMask`] and stroke painting ([`MaskStore`]).
//! 4. **Effects**: thresholded alpha removal ([`compose`]) and display resampling.
//! 5. **Session**: [`EditSession`] turns [`GestureEvent`]s into edits and keeps both panes of a
//!    [`RenderTarget`] current.
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs give byte-identical masks and outputs.
//! - **No IO in the core**: image files go through an [`ImageIo`] implementation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod mask;
mod session;
mod transform;
mod viewport;

pub use assets::decode::{SourceImage, decode_image, encode_png};
pub use assets::io::{FsImageIo, ImageIo};
pub use effects::composite::{Rgba8, compose, remove_if_bright};
pub use effects::resample::{DISPLAY_FILTER, displayed_image};
pub use foundation::core::{CropRect, PixelPoint, PixelSize, Point, Vec2};
pub use foundation::error::{BgcutError, BgcutResult};
pub use mask::bits::{ELIGIBLE_LUMA, PROTECTED_LUMA, RetentionMask};
pub use mask::store::{MaskInit, MaskStore};
pub use mask::stroke::Stroke;
pub use session::edit_session::{CoordinateReadout, DerivedViews, EditSession};
pub use session::gesture::{GestureEvent, PointerButton};
pub use session::opts::{BrushMode, SessionOpts};
pub use session::target::{InMemoryTarget, Pane, Placement, PresentedFrame, RenderTarget};
pub use transform::coords::{
    canvas_to_displayed, canvas_to_source, canvas_to_source_with, displayed_to_canvas,
    displayed_to_source, source_to_canvas, source_to_displayed,
};
pub use transform::fit::{ViewFit, canvas_offset, display_scale, displayed_size};
pub use viewport::controller::{DEFAULT_MAX_ZOOM, MIN_ZOOM, ViewportController};
pub use viewport::window::DisplayWindow;
