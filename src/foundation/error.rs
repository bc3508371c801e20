/// Convenience result type used across bgcut.
pub type BgcutResult<T> = Result<T, BgcutError>;

/// Error taxonomy for session and engine APIs.
///
/// None of these are fatal: a session that reports one is left in the state it had before
/// the failing call (or, for [`BgcutError::Save`], with the processed image kept for retry).
#[derive(thiserror::Error, Debug)]
pub enum BgcutError {
    /// Unreadable path, unsupported or corrupt image data.
    #[error("load error: {0}")]
    Load(String),

    /// Output could not be written.
    #[error("save error: {0}")]
    Save(String),

    /// User-entered value could not be parsed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation needed a loaded image and there was none.
    #[error("no image loaded")]
    NoImageLoaded,

    /// API misuse, e.g. mismatched buffer dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BgcutError {
    /// Build a [`BgcutError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`BgcutError::Save`] value.
    pub fn save(msg: impl Into<String>) -> Self {
        Self::Save(msg.into())
    }

    /// Build a [`BgcutError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`BgcutError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// `true` for errors the interactive surface reports as a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NoImageLoaded)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
