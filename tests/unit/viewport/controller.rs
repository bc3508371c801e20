use super::*;
use crate::foundation::core::PixelPoint;

fn size(w: u32, h: u32) -> PixelSize {
    PixelSize::new(w, h).unwrap()
}

fn assert_contained(vp: &ViewportController) {
    let w = vp.window();
    assert!(
        w.crop.is_within(vp.source_size()),
        "crop {:?} escaped {:?}",
        w.crop,
        vp.source_size()
    );
    assert!(w.zoom_level >= MIN_ZOOM && w.zoom_level <= DEFAULT_MAX_ZOOM);
}

#[test]
fn new_controller_shows_full_extent() {
    let vp = ViewportController::new(size(1000, 800), DEFAULT_MAX_ZOOM);
    assert_eq!(vp.window().crop.as_tuple(), (0, 0, 1000, 800));
    assert_eq!(vp.zoom_level(), 1.0);
    assert_eq!(vp.window().focal_point, Point::new(500.0, 400.0));
}

#[test]
fn wheel_zoom_scenario_on_1000x800() {
    let mut vp = ViewportController::new(size(1000, 800), DEFAULT_MAX_ZOOM);
    let w = *vp.zoom(2.4, Point::new(150.0, 150.0), size(300, 300));

    // 300x300 canvas: scale 0.3, displayed 300x240 at offset (0, 30); canvas (150, 150)
    // is displayed (150, 120), i.e. source (500, 400).
    assert!((w.zoom_level - 3.4).abs() < 1e-12);
    // floor(1000 / 3.4) = 294, floor(800 / 3.4) = 235
    assert_eq!(w.crop.size(), size(294, 235));
    // 500 - 294 div 2 = 353, 400 - 235 div 2 = 283
    assert_eq!(w.crop.as_tuple(), (353, 283, 647, 518));
    assert_eq!(w.focal_point, Point::new(500.0, 400.0));
}

#[test]
fn zero_delta_zoom_is_idempotent() {
    let mut vp = ViewportController::new(size(1000, 800), DEFAULT_MAX_ZOOM);
    vp.zoom_at_source(3.0, Point::new(37.0, 790.0));

    let fp = Point::new(612.0, 105.0);
    let once = *vp.zoom_at_source(0.0, fp);
    let twice = *vp.zoom_at_source(0.0, fp);
    assert_eq!(once, twice);

    let again = *vp.zoom_at_source(0.0, once.focal_point);
    assert_eq!(again, once);
}

#[test]
fn zooming_out_to_one_is_exact_full_extent() {
    let mut vp = ViewportController::new(size(1000, 800), DEFAULT_MAX_ZOOM);
    vp.zoom_at_source(7.0, Point::new(990.0, 10.0));
    vp.pan(Vec2::new(-40.0, 25.0));
    vp.zoom_at_source(-100.0, Point::new(3.0, 3.0));
    assert_eq!(vp.window().crop.as_tuple(), (0, 0, 1000, 800));
    assert_eq!(vp.zoom_level(), 1.0);
    assert!(vp.window().is_full(size(1000, 800)));
}

#[test]
fn wheel_steps_return_exactly_to_one() {
    let mut vp = ViewportController::new(size(640, 480), DEFAULT_MAX_ZOOM);
    for _ in 0..13 {
        vp.zoom_at_source(0.1, Point::new(320.0, 240.0));
    }
    assert!(vp.zoom_level() > 2.2);
    for _ in 0..13 {
        vp.zoom_at_source(-0.1, Point::new(320.0, 240.0));
    }
    assert_eq!(vp.zoom_level(), 1.0);
    assert_eq!(vp.window().crop.as_tuple(), (0, 0, 640, 480));
}

#[test]
fn zoom_clamps_to_limits() {
    let mut vp = ViewportController::new(size(1000, 800), DEFAULT_MAX_ZOOM);
    vp.zoom_at_source(1000.0, Point::new(500.0, 400.0));
    assert_eq!(vp.zoom_level(), DEFAULT_MAX_ZOOM);
    assert_eq!(vp.window().crop.size(), size(40, 32));

    let mut capped = ViewportController::new(size(1000, 800), 4.0);
    capped.zoom_at_source(10.0, Point::new(500.0, 400.0));
    assert_eq!(capped.zoom_level(), 4.0);
}

#[test]
fn focal_near_edge_shifts_crop_inside() {
    let mut vp = ViewportController::new(size(1000, 800), DEFAULT_MAX_ZOOM);
    let w = *vp.zoom_at_source(1.0, Point::new(995.0, 2.0));
    assert_eq!(w.crop.as_tuple(), (500, 0, 1000, 400));
    assert_eq!(w.focal_point, Point::new(750.0, 200.0));
}

#[test]
fn pan_scales_with_zoom_and_clamps() {
    let mut vp = ViewportController::new(size(1000, 800), DEFAULT_MAX_ZOOM);
    vp.zoom_at_source(1.0, Point::new(500.0, 400.0));
    assert_eq!(vp.window().crop.as_tuple(), (250, 200, 750, 600));

    // 10 canvas pixels at zoom 2 move the focal point 20 source pixels.
    let w = *vp.pan(Vec2::new(10.0, -5.0));
    assert_eq!(w.crop.as_tuple(), (270, 190, 770, 590));

    let w = *vp.pan(Vec2::new(10_000.0, 10_000.0));
    assert_eq!(w.crop.as_tuple(), (500, 400, 1000, 800));
    assert_eq!(w.crop.size(), size(500, 400));
}

#[test]
fn pan_at_full_extent_is_a_no_op() {
    let mut vp = ViewportController::new(size(1000, 800), DEFAULT_MAX_ZOOM);
    let w = *vp.pan(Vec2::new(120.0, -80.0));
    assert_eq!(w, DisplayWindow::full(size(1000, 800)));
}

#[test]
fn tiny_source_never_degenerates() {
    let mut vp = ViewportController::new(size(3, 2), DEFAULT_MAX_ZOOM);
    let w = *vp.zoom_at_source(24.0, Point::new(2.0, 1.0));
    assert_eq!(w.crop.size(), size(1, 1));
    assert_eq!(w.crop.as_tuple(), (2, 1, 3, 2));
    assert_contained(&vp);
}

#[test]
fn zoom_outside_displayed_image_keeps_focal_point() {
    let mut vp = ViewportController::new(size(1000, 800), DEFAULT_MAX_ZOOM);
    vp.zoom_at_source(1.0, Point::new(200.0, 300.0));
    let before = vp.window().focal_point;
    let canvas = size(300, 300);
    // The 500x400 crop displays as 300x240, leaving bands above y = 30.
    vp.zoom(1.0, Point::new(150.0, 5.0), canvas);
    assert_eq!(vp.window().focal_point, before);
}

#[test]
fn non_finite_inputs_are_ignored() {
    let mut vp = ViewportController::new(size(1000, 800), DEFAULT_MAX_ZOOM);
    vp.zoom_at_source(1.0, Point::new(200.0, 300.0));
    let before = *vp.window();
    vp.zoom_at_source(f64::NAN, Point::new(f64::INFINITY, 0.0));
    assert_eq!(*vp.window(), before);
}

#[test]
fn reset_adopts_new_source() {
    let mut vp = ViewportController::new(size(1000, 800), DEFAULT_MAX_ZOOM);
    vp.zoom_at_source(5.0, Point::new(10.0, 10.0));
    vp.reset(size(64, 32));
    assert_eq!(vp.window().crop.as_tuple(), (0, 0, 64, 32));
    assert_eq!(vp.zoom_level(), 1.0);
}

#[test]
fn arbitrary_gesture_sequences_stay_contained() {
    // Small LCG so the sequence is reproducible without extra dependencies.
    let mut state: u64 = 0x5eed_1234_abcd_0001;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) as u32
    };

    let canvas = size(300, 300);
    for (w, h) in [(1000, 800), (37, 1200), (5, 5), (1, 1), (4096, 3)] {
        let mut vp = ViewportController::new(size(w, h), DEFAULT_MAX_ZOOM);
        for _ in 0..400 {
            match next() % 3 {
                0 => {
                    let delta = (f64::from(next() % 41) - 20.0) / 4.0;
                    let p = Point::new(f64::from(next() % 300), f64::from(next() % 300));
                    vp.zoom(delta, p, canvas);
                }
                1 => {
                    let d = Vec2::new(
                        f64::from(next() % 201) - 100.0,
                        f64::from(next() % 201) - 100.0,
                    );
                    vp.pan(d);
                }
                _ => {
                    let fp = PixelPoint::new(i64::from(next() % (w * 2)), i64::from(next() % (h * 2)));
                    vp.zoom_at_source(0.0, fp.to_point());
                }
            }
            assert_contained(&vp);
            if vp.zoom_level() == 1.0 {
                assert!(vp.window().is_full(size(w, h)));
            }
        }
    }
}
