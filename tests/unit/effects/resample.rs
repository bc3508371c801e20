use super::*;
use crate::foundation::core::CropRect;
use image::Rgba;

#[test]
fn unit_scale_crop_is_exact_copy() {
    let src = RgbaImage::from_fn(10, 8, |x, y| Rgba([x as u8, y as u8, 0, 255]));
    let crop = CropRect::new(2, 3, 6, 8).unwrap();
    let window = DisplayWindow {
        crop,
        zoom_level: 2.0,
        focal_point: crop.center().to_point(),
    };
    let out = displayed_image(&src, &window, crop.size());
    assert_eq!(out.dimensions(), (4, 5));
    assert_eq!(out.get_pixel(0, 0).0, [2, 3, 0, 255]);
    assert_eq!(out.get_pixel(3, 4).0, [5, 7, 0, 255]);
}

#[test]
fn scaled_output_has_requested_size() {
    let src = RgbaImage::from_pixel(1000, 800, Rgba([200, 10, 10, 255]));
    let window = DisplayWindow::full(PixelSize::new(1000, 800).unwrap());
    let out = displayed_image(&src, &window, PixelSize::new(300, 240).unwrap());
    assert_eq!(out.dimensions(), (300, 240));
    let px = out.get_pixel(150, 120).0;
    for (got, want) in px.iter().zip([200u8, 10, 10, 255]) {
        assert!(got.abs_diff(want) <= 1, "{px:?}");
    }
}
