use super::*;

#[test]
fn luma_endpoints_and_weights() {
    assert_eq!(luma601(0, 0, 0), 0);
    assert_eq!(luma601(255, 255, 255), 255);
    // 0.299 * 255 = 76.2
    assert_eq!(luma601(255, 0, 0), 76);
    // 0.587 * 255 = 149.7
    assert_eq!(luma601(0, 255, 0), 150);
    // 0.114 * 255 = 29.1
    assert_eq!(luma601(0, 0, 255), 29);
}

#[test]
fn half_floor_rounds_down() {
    assert_eq!(half_floor(7), 3);
    assert_eq!(half_floor(-7), -4);
    assert_eq!(half_floor(-1), -1);
    assert_eq!(half_floor(0), 0);
}

#[test]
fn snap_only_inside_epsilon() {
    assert_eq!(snap_to(1.0 + 1e-12, 1.0, 1e-9), 1.0);
    assert_eq!(snap_to(1.1, 1.0, 1e-9), 1.1);
}

#[test]
fn segment_distance_clamps_to_endpoints() {
    assert_eq!(dist_sq_to_segment((5.0, 3.0), (0.0, 0.0), (10.0, 0.0)), 9.0);
    assert_eq!(dist_sq_to_segment((-3.0, 4.0), (0.0, 0.0), (10.0, 0.0)), 25.0);
    assert_eq!(dist_sq_to_segment((1.0, 1.0), (0.0, 0.0), (0.0, 0.0)), 2.0);
}
