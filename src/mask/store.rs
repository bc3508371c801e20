use image::{GrayImage, RgbaImage};

use crate::foundation::core::{PixelPoint, PixelSize};
use crate::foundation::math::luma601;
use crate::mask::bits::RetentionMask;
use crate::mask::stroke::Stroke;
use crate::transform::fit::displayed_size;
use crate::viewport::window::DisplayWindow;

/// How a fresh mask is derived from a newly loaded image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskInit {
    /// Protect pixels whose luma is at or below the session threshold.
    #[default]
    Luminance,
    /// Protect everything; strokes release regions for removal.
    AllProtected,
    /// Protect nothing; strokes protect regions.
    AllEligible,
}

/// Owns the full-resolution [`RetentionMask`] for one source image.
///
/// The mask is never resized. Views for a [`DisplayWindow`] are cropped and scaled copies.
#[derive(Clone, Debug)]
pub struct MaskStore {
    mask: RetentionMask,
}

impl MaskStore {
    /// Allocate a mask matching `source`, filled according to `policy`.
    #[tracing::instrument(skip(source), fields(w = source.width(), h = source.height()))]
    pub fn initialize(source: &RgbaImage, policy: MaskInit, threshold: u8) -> Self {
        let size = PixelSize::from(source.dimensions());
        let mask = match policy {
            MaskInit::AllProtected => RetentionMask::new(size, true),
            MaskInit::AllEligible => RetentionMask::new(size, false),
            MaskInit::Luminance => {
                let raw = source.as_raw();
                RetentionMask::from_index_fn(size, |i| {
                    let px = &raw[i * 4..i * 4 + 4];
                    luma601(px[0], px[1], px[2]) <= threshold
                })
            }
        };
        tracing::debug!(protected = mask.count_protected(), "mask initialized");
        Self { mask }
    }

    /// Wrap an existing mask.
    pub fn from_mask(mask: RetentionMask) -> Self {
        Self { mask }
    }

    /// The full-resolution mask.
    pub fn mask(&self) -> &RetentionMask {
        &self.mask
    }

    /// Mask dimensions, always equal to the source dimensions.
    pub fn size(&self) -> PixelSize {
        self.mask.size()
    }

    /// Draw a segment between two source points; returns the number of bits changed.
    pub fn paint_stroke(
        &mut self,
        from: PixelPoint,
        to: PixelPoint,
        width: u32,
        protect: bool,
    ) -> usize {
        self.apply(&Stroke {
            from,
            to,
            width,
            protect,
        })
    }

    /// Apply a prepared [`Stroke`]; returns the number of bits changed.
    pub fn apply(&mut self, stroke: &Stroke) -> usize {
        let mut changed = 0usize;
        let mask = &mut self.mask;
        stroke.rasterize(mask.size(), |x, y| {
            if mask.set(x, y, stroke.protect) {
                changed += 1;
            }
        });
        tracing::trace!(?stroke, changed, "stroke applied");
        changed
    }

    /// The window's crop resampled (nearest neighbour) to its displayed size.
    pub fn crop_scaled(&self, window: &DisplayWindow, scale: f64) -> RetentionMask {
        let crop = window.crop;
        let out = displayed_size(crop.size(), scale);
        let sample = |d: u32, extent: u32| -> u32 {
            let s = ((f64::from(d) + 0.5) / scale).floor();
            (s.max(0.0) as u32).min(extent - 1)
        };
        let cols: Vec<u32> = (0..out.width)
            .map(|dx| crop.left + sample(dx, crop.width()))
            .collect();
        let rows: Vec<u32> = (0..out.height)
            .map(|dy| crop.upper + sample(dy, crop.height()))
            .collect();

        let w = out.width as usize;
        RetentionMask::from_index_fn(out, |i| self.mask.is_protected(cols[i % w], rows[i / w]))
    }

    /// Rendering-ready bitmap of [`MaskStore::crop_scaled`].
    pub fn view_for(&self, window: &DisplayWindow, scale: f64) -> GrayImage {
        self.crop_scaled(window, scale).to_gray()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/store.rs"]
mod tests;
