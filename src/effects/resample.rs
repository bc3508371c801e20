use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::foundation::core::PixelSize;
use crate::viewport::window::DisplayWindow;

/// Filter used to scale the visible crop to the canvas.
pub const DISPLAY_FILTER: FilterType = FilterType::Lanczos3;

/// The window's crop of `source`, resized to `displayed`.
pub fn displayed_image(
    source: &RgbaImage,
    window: &DisplayWindow,
    displayed: PixelSize,
) -> RgbaImage {
    let crop = window.crop;
    let view = imageops::crop_imm(source, crop.left, crop.upper, crop.width(), crop.height())
        .to_image();
    if crop.size() == displayed {
        return view;
    }
    imageops::resize(&view, displayed.width, displayed.height, DISPLAY_FILTER)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/resample.rs"]
mod tests;
