use crate::foundation::core::{PixelPoint, PixelSize};
use crate::foundation::math::dist_sq_to_segment;

/// One brush segment in source coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Previous pointer position.
    pub from: PixelPoint,
    /// Current pointer position.
    pub to: PixelPoint,
    /// Brush diameter in source pixels; values below 1 act as 1.
    pub width: u32,
    /// Bit value written: `true` protects, `false` releases.
    pub protect: bool,
}

impl Stroke {
    /// Visit every pixel of `bounds` covered by the stroke.
    ///
    /// A pixel is covered when its centre lies within `width / 2` of the segment joining the
    /// endpoint pixel centres (round caps). Endpoints are clamped into `bounds` first.
    pub fn rasterize(&self, bounds: PixelSize, mut plot: impl FnMut(u32, u32)) {
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let a = bounds.clamp(self.from);
        let b = bounds.clamp(self.to);
        let radius = f64::from(self.width.max(1)) / 2.0;
        let r_sq = radius * radius;
        let pad = radius.ceil() as i64;

        let x0 = (a.x.min(b.x) - pad).max(0);
        let y0 = (a.y.min(b.y) - pad).max(0);
        let x1 = (a.x.max(b.x) + pad).min(i64::from(bounds.width) - 1);
        let y1 = (a.y.max(b.y) + pad).min(i64::from(bounds.height) - 1);

        let ac = a.center();
        let bc = b.center();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let c = PixelPoint::new(x, y).center();
                if dist_sq_to_segment((c.x, c.y), (ac.x, ac.y), (bc.x, bc.y)) <= r_sq {
                    plot(x as u32, y as u32);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/stroke.rs"]
mod tests;
