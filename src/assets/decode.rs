use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::core::PixelSize;
use crate::foundation::error::{BgcutError, BgcutResult};

/// Immutable full-resolution RGBA8 raster, shared cheaply between session views.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pixels: Arc<RgbaImage>,
}

impl SourceImage {
    /// Wrap a decoded raster. Empty images are rejected.
    pub fn from_rgba(pixels: RgbaImage) -> BgcutResult<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(BgcutError::load("image has no pixels"));
        }
        Ok(Self {
            pixels: Arc::new(pixels),
        })
    }

    /// Dimensions in pixels.
    pub fn size(&self) -> PixelSize {
        PixelSize::from(self.pixels.dimensions())
    }

    /// Borrow the raster.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Decode encoded image bytes (any format `image` recognises) into RGBA8.
pub fn decode_image(bytes: &[u8]) -> BgcutResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| BgcutError::load(format!("{e:#}")))?;
    SourceImage::from_rgba(dyn_img.into_rgba8())
}

/// Encode RGBA8 pixels as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> BgcutResult<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")
        .map_err(|e| BgcutError::save(format!("{e:#}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
