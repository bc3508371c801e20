use image::{GrayImage, Luma};
use rayon::prelude::*;

use crate::foundation::core::PixelSize;

/// Bitmap value for protected pixels in rendered mask views.
pub const PROTECTED_LUMA: u8 = 0;
/// Bitmap value for removal-eligible pixels in rendered mask views.
pub const ELIGIBLE_LUMA: u8 = 255;

/// One bit per pixel, row-major, packed into `u64` words.
///
/// A set bit marks the pixel *protected*: compositing never alters it. A clear bit marks it
/// eligible for background removal.
#[derive(Clone, PartialEq, Eq)]
pub struct RetentionMask {
    size: PixelSize,
    words: Vec<u64>,
}

impl std::fmt::Debug for RetentionMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetentionMask")
            .field("size", &self.size)
            .field("protected", &self.count_protected())
            .finish()
    }
}

impl RetentionMask {
    /// Mask with every bit set to `protected`.
    pub fn new(size: PixelSize, protected: bool) -> Self {
        let fill = if protected { u64::MAX } else { 0 };
        let mut mask = Self {
            size,
            words: vec![fill; size.area().div_ceil(64)],
        };
        mask.clear_tail();
        mask
    }

    /// Build a mask from a per-pixel predicate over the linear index `y * w + x`.
    ///
    /// Words are filled in parallel; the result does not depend on scheduling.
    pub fn from_index_fn<F>(size: PixelSize, protected: F) -> Self
    where
        F: Fn(usize) -> bool + Sync,
    {
        let area = size.area();
        let mut words = vec![0u64; area.div_ceil(64)];
        words.par_iter_mut().enumerate().for_each(|(wi, word)| {
            let start = wi * 64;
            let end = (start + 64).min(area);
            let mut bits = 0u64;
            for i in start..end {
                if protected(i) {
                    bits |= 1 << (i - start);
                }
            }
            *word = bits;
        });
        Self { size, words }
    }

    /// Mask dimensions.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// `true` when the pixel is protected. Out-of-range reads are `false`.
    pub fn is_protected(&self, x: u32, y: u32) -> bool {
        if x >= self.size.width || y >= self.size.height {
            return false;
        }
        self.bit(self.index(x, y))
    }

    /// Set one pixel; returns `true` if the bit changed. Out-of-range writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, protected: bool) -> bool {
        if x >= self.size.width || y >= self.size.height {
            return false;
        }
        let i = self.index(x, y);
        let before = self.bit(i);
        let m = 1u64 << (i % 64);
        if protected {
            self.words[i / 64] |= m;
        } else {
            self.words[i / 64] &= !m;
        }
        before != protected
    }

    /// Number of protected pixels.
    pub fn count_protected(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Render as an 8-bit bitmap: protected black, eligible white.
    pub fn to_gray(&self) -> GrayImage {
        GrayImage::from_fn(self.size.width, self.size.height, |x, y| {
            Luma([if self.is_protected(x, y) {
                PROTECTED_LUMA
            } else {
                ELIGIBLE_LUMA
            }])
        })
    }

    fn bit(&self, i: usize) -> bool {
        (self.words[i / 64] >> (i % 64)) & 1 == 1
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.size.width as usize) + (x as usize)
    }

    fn clear_tail(&mut self) {
        let rem = self.size.area() % 64;
        if rem != 0
            && let Some(last) = self.words.last_mut()
        {
            *last &= (1u64 << rem) - 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/bits.rs"]
mod tests;
