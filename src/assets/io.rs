use std::path::Path;

use anyhow::Context;
use image::{ImageFormat, RgbaImage};

use crate::assets::decode::SourceImage;
use crate::foundation::error::{BgcutError, BgcutResult};

/// Loading and saving images on behalf of an edit session.
pub trait ImageIo {
    /// Read an image; unreadable or unsupported input is a [`BgcutError::Load`].
    fn load(&self, path: &Path) -> BgcutResult<SourceImage>;
    /// Write an image; failures are a [`BgcutError::Save`].
    fn save(&self, image: &RgbaImage, path: &Path) -> BgcutResult<()>;
}

/// [`ImageIo`] over the local filesystem.
///
/// The input format is detected from content. The output format follows the extension and
/// falls back to PNG; missing parent directories are created.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsImageIo;

impl ImageIo for FsImageIo {
    #[tracing::instrument(skip(self))]
    fn load(&self, path: &Path) -> BgcutResult<SourceImage> {
        let img = image::ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .with_context(|| format!("open image '{}'", path.display()))
            .map_err(|e| BgcutError::load(format!("{e:#}")))?
            .decode()
            .with_context(|| format!("decode image '{}'", path.display()))
            .map_err(|e| BgcutError::load(format!("{e:#}")))?;
        SourceImage::from_rgba(img.into_rgba8())
    }

    #[tracing::instrument(skip(self, image))]
    fn save(&self, image: &RgbaImage, path: &Path) -> BgcutResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))
                .map_err(|e| BgcutError::save(format!("{e:#}")))?;
        }
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
        image
            .save_with_format(path, format)
            .with_context(|| format!("write image '{}'", path.display()))
            .map_err(|e| BgcutError::save(format!("{e:#}")))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/io.rs"]
mod tests;
