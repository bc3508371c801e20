/// ITU-R 601 luma in 16.16 fixed point, rounded to nearest.
pub(crate) fn luma601(r: u8, g: u8, b: u8) -> u8 {
    let acc = 19_595 * u32::from(r) + 38_470 * u32::from(g) + 7_471 * u32::from(b) + 0x8000;
    (acc >> 16) as u8
}

/// Half of `v`, rounded toward negative infinity.
pub(crate) fn half_floor(v: i64) -> i64 {
    v.div_euclid(2)
}

/// Snap `v` to `target` when within `eps`.
pub(crate) fn snap_to(v: f64, target: f64, eps: f64) -> f64 {
    if (v - target).abs() < eps { target } else { v }
}

/// Squared distance from `p` to segment `a..b`.
pub(crate) fn dist_sq_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq <= 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    (p.0 - cx) * (p.0 - cx) + (p.1 - cy) * (p.1 - cy)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
