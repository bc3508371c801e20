use crate::foundation::error::{BgcutError, BgcutResult};

pub use kurbo::{Point, Vec2};

/// Width and height of a raster or canvas, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Create a validated, non-empty size.
    pub fn new(width: u32, height: u32) -> BgcutResult<Self> {
        if width == 0 || height == 0 {
            return Err(BgcutError::validation("PixelSize must be non-empty"));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered.
    pub fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Return `true` when `p` addresses a pixel inside `[0, w) x [0, h)`.
    pub fn contains(self, p: PixelPoint) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < i64::from(self.width) && p.y < i64::from(self.height)
    }

    /// Clamp a pixel address into `[0, w - 1] x [0, h - 1]`.
    ///
    /// Empty sizes clamp to the origin.
    pub fn clamp(self, p: PixelPoint) -> PixelPoint {
        let max_x = i64::from(self.width.saturating_sub(1));
        let max_y = i64::from(self.height.saturating_sub(1));
        PixelPoint::new(p.x.clamp(0, max_x), p.y.clamp(0, max_y))
    }
}

impl From<(u32, u32)> for PixelSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Integer pixel address. Signed so canvas-relative offsets may go negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelPoint {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl PixelPoint {
    /// Build a pixel address.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Snap a continuous point to the pixel containing it.
    pub fn floor(p: Point) -> Self {
        Self::new(p.x.floor() as i64, p.y.floor() as i64)
    }

    /// Snap a continuous point to the nearest pixel corner.
    pub fn round(p: Point) -> Self {
        Self::new(p.x.round() as i64, p.y.round() as i64)
    }

    /// Continuous point at this pixel's top-left corner.
    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// Continuous point at this pixel's centre.
    pub fn center(self) -> Point {
        Point::new(self.x as f64 + 0.5, self.y as f64 + 0.5)
    }
}

/// Crop rectangle `(left, upper, right, lower)` in source pixels; `right`/`lower` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    /// Inclusive left edge.
    pub left: u32,
    /// Inclusive top edge.
    pub upper: u32,
    /// Exclusive right edge.
    pub right: u32,
    /// Exclusive bottom edge.
    pub lower: u32,
}

impl CropRect {
    /// Create a validated, non-degenerate rectangle.
    pub fn new(left: u32, upper: u32, right: u32, lower: u32) -> BgcutResult<Self> {
        if right <= left || lower <= upper {
            return Err(BgcutError::validation(
                "CropRect requires right > left and lower > upper",
            ));
        }
        Ok(Self {
            left,
            upper,
            right,
            lower,
        })
    }

    /// Rectangle covering a whole raster.
    pub fn full(size: PixelSize) -> Self {
        Self {
            left: 0,
            upper: 0,
            right: size.width,
            lower: size.height,
        }
    }

    /// Width in pixels.
    pub fn width(self) -> u32 {
        self.right - self.left
    }

    /// Height in pixels.
    pub fn height(self) -> u32 {
        self.lower - self.upper
    }

    /// Extent of the rectangle.
    pub fn size(self) -> PixelSize {
        PixelSize {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Top-left corner.
    pub fn origin(self) -> PixelPoint {
        PixelPoint::new(i64::from(self.left), i64::from(self.upper))
    }

    /// Integer centre, `(left + w div 2, upper + h div 2)`.
    pub fn center(self) -> PixelPoint {
        PixelPoint::new(
            i64::from(self.left + self.width() / 2),
            i64::from(self.upper + self.height() / 2),
        )
    }

    /// Return `true` when the rectangle lies within `[0, w] x [0, h]` and is non-degenerate.
    pub fn is_within(self, size: PixelSize) -> bool {
        self.right > self.left
            && self.lower > self.upper
            && self.right <= size.width
            && self.lower <= size.height
    }

    /// Return `true` when `p` addresses a pixel inside the rectangle.
    pub fn contains(self, p: PixelPoint) -> bool {
        p.x >= i64::from(self.left)
            && p.y >= i64::from(self.upper)
            && p.x < i64::from(self.right)
            && p.y < i64::from(self.lower)
    }

    /// As a `(left, upper, right, lower)` tuple.
    pub fn as_tuple(self) -> (u32, u32, u32, u32) {
        (self.left, self.upper, self.right, self.lower)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
