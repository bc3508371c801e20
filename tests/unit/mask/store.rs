use super::*;
use crate::foundation::core::{CropRect, Point};
use crate::viewport::controller::{DEFAULT_MAX_ZOOM, ViewportController};
use image::Rgba;

fn size(w: u32, h: u32) -> PixelSize {
    PixelSize::new(w, h).unwrap()
}

fn grey_ramp(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, _| {
        let v = (x * 255 / (w - 1)) as u8;
        Rgba([v, v, v, 255])
    })
}

#[test]
fn luminance_init_protects_dark_pixels() {
    let img = RgbaImage::from_vec(
        4,
        1,
        vec![
            10, 10, 10, 255, //
            200, 200, 200, 255, //
            201, 201, 201, 255, //
            250, 250, 250, 0,
        ],
    )
    .unwrap();
    let store = MaskStore::initialize(&img, MaskInit::Luminance, 200);
    let m = store.mask();
    assert!(m.is_protected(0, 0));
    assert!(m.is_protected(1, 0));
    assert!(!m.is_protected(2, 0));
    assert!(!m.is_protected(3, 0));
}

#[test]
fn blank_policies_fill_uniformly() {
    let img = grey_ramp(16, 5);
    assert_eq!(
        MaskStore::initialize(&img, MaskInit::AllProtected, 0)
            .mask()
            .count_protected(),
        80
    );
    assert_eq!(
        MaskStore::initialize(&img, MaskInit::AllEligible, 255)
            .mask()
            .count_protected(),
        0
    );
}

#[test]
fn mask_size_matches_source() {
    let img = grey_ramp(37, 11);
    let store = MaskStore::initialize(&img, MaskInit::Luminance, 128);
    assert_eq!(store.size(), size(37, 11));
}

#[test]
fn paint_stroke_counts_changed_bits() {
    let img = grey_ramp(20, 20);
    let mut store = MaskStore::initialize(&img, MaskInit::AllEligible, 0);
    let n = store.paint_stroke(PixelPoint::new(2, 10), PixelPoint::new(12, 10), 1, true);
    assert_eq!(n, 11);
    assert_eq!(
        store.paint_stroke(PixelPoint::new(2, 10), PixelPoint::new(12, 10), 1, true),
        0
    );
    assert_eq!(
        store.paint_stroke(PixelPoint::new(7, 10), PixelPoint::new(7, 10), 1, false),
        1
    );
    assert_eq!(store.mask().count_protected(), 10);
}

#[test]
fn full_window_at_unit_scale_is_identity() {
    let img = grey_ramp(24, 9);
    let store = MaskStore::initialize(&img, MaskInit::Luminance, 100);
    let window = DisplayWindow::full(size(24, 9));
    assert_eq!(&store.crop_scaled(&window, 1.0), store.mask());
}

#[test]
fn magnified_crop_repeats_source_pixels() {
    let mut store = MaskStore::from_mask(RetentionMask::new(size(10, 10), false));
    store.paint_stroke(PixelPoint::new(4, 4), PixelPoint::new(4, 4), 1, true);
    let crop = CropRect::new(4, 4, 6, 6).unwrap();
    let window = DisplayWindow {
        crop,
        zoom_level: 5.0,
        focal_point: crop.center().to_point(),
    };
    let view = store.crop_scaled(&window, 3.0);
    assert_eq!(view.size(), size(6, 6));
    for y in 0..6 {
        for x in 0..6 {
            assert_eq!(view.is_protected(x, y), x < 3 && y < 3, "({x}, {y})");
        }
    }
}

#[test]
fn view_for_has_displayed_dimensions() {
    let img = grey_ramp(1000, 800);
    let store = MaskStore::initialize(&img, MaskInit::Luminance, 128);
    let window = DisplayWindow::full(size(1000, 800));
    let view = store.view_for(&window, 0.3);
    assert_eq!(view.dimensions(), (300, 240));
    // Left half of the ramp is dark (protected, black), right half bright.
    assert_eq!(view.get_pixel(10, 100).0, [0]);
    assert_eq!(view.get_pixel(290, 100).0, [255]);
}

#[test]
fn mask_survives_zoom_round_trip() {
    let img = grey_ramp(400, 300);
    let mut store = MaskStore::initialize(&img, MaskInit::AllEligible, 0);
    store.paint_stroke(PixelPoint::new(50, 60), PixelPoint::new(350, 240), 5, true);
    let before = store.mask().clone();
    let full_view = store.view_for(&DisplayWindow::full(size(400, 300)), 0.75);

    let mut vp = ViewportController::new(size(400, 300), DEFAULT_MAX_ZOOM);
    let canvas = size(300, 300);
    vp.zoom(4.0, Point::new(150.0, 150.0), canvas);
    let fit = vp.fit(canvas);
    let _zoomed = store.view_for(vp.window(), fit.scale);
    vp.zoom_at_source(-4.0, vp.window().focal_point);

    let fit = vp.fit(canvas);
    assert_eq!(store.mask(), &before);
    assert_eq!(store.view_for(vp.window(), fit.scale), full_view);
}
