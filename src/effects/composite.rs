use image::RgbaImage;
use rayon::prelude::*;

use crate::foundation::core::PixelSize;
use crate::foundation::error::{BgcutError, BgcutResult};
use crate::mask::bits::RetentionMask;

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Result for one pixel: protected pixels and pixels with any channel at or below
/// `threshold` are kept; the rest become fully transparent with their colour preserved.
pub fn remove_if_bright(px: Rgba8, protected: bool, threshold: u8) -> Rgba8 {
    if protected {
        return px;
    }
    if px[0] > threshold && px[1] > threshold && px[2] > threshold {
        return [px[0], px[1], px[2], 0];
    }
    px
}

/// Apply [`remove_if_bright`] to every pixel of `image` under `mask`.
///
/// Rows are processed in parallel; output is byte-identical for identical inputs.
#[tracing::instrument(skip(image, mask), fields(w = image.width(), h = image.height()))]
pub fn compose(image: &RgbaImage, mask: &RetentionMask, threshold: u8) -> BgcutResult<RgbaImage> {
    if PixelSize::from(image.dimensions()) != mask.size() {
        return Err(BgcutError::validation(format!(
            "compose expects mask {}x{} to match image {}x{}",
            mask.width(),
            mask.height(),
            image.width(),
            image.height()
        )));
    }

    let mut out = image.clone();
    let row_len = image.width() as usize * 4;
    if row_len == 0 {
        return Ok(out);
    }
    out.par_chunks_mut(row_len).enumerate().for_each(|(y, row)| {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let protected = mask.is_protected(x as u32, y as u32);
            let res = remove_if_bright([px[0], px[1], px[2], px[3]], protected, threshold);
            px.copy_from_slice(&res);
        }
    });
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
