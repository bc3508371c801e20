//! Coordinate mapping between the canvas, the displayed crop and the source image.

pub(crate) mod coords;
pub(crate) mod fit;
