use crate::mask::store::MaskInit;
use crate::viewport::controller::DEFAULT_MAX_ZOOM;

/// What the primary pointer paints into the mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushMode {
    /// Mark pixels protected.
    #[default]
    Protect,
    /// Make pixels eligible for removal again.
    Release,
}

impl BrushMode {
    /// Mask bit written by this mode.
    pub fn bit(self) -> bool {
        matches!(self, Self::Protect)
    }
}

/// Tunables for an [`EditSession`](crate::EditSession).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    /// Brush diameter in source pixels.
    pub brush_width: u32,
    /// What strokes write.
    pub brush: BrushMode,
    /// Zoom change per wheel notch.
    pub zoom_step: f64,
    /// Upper zoom limit.
    pub max_zoom: f64,
    /// Initial brightness threshold, 0-255.
    pub threshold: u8,
    /// Mask derivation applied on every image load.
    pub mask_init: MaskInit,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            brush_width: 5,
            brush: BrushMode::Protect,
            zoom_step: 0.1,
            max_zoom: DEFAULT_MAX_ZOOM,
            threshold: 200,
            mask_init: MaskInit::Luminance,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
