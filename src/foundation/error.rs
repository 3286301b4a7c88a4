/// Convenience result type used across metamorph.
pub type MorphResult<T> = Result<T, MorphError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Contract violations (mismatched feature arrays, mismatched images) get their own variants so
/// callers can tell them apart from bad parameters or unreadable inputs.
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// Invalid user-provided parameters or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// The two index-aligned feature arrays have different lengths.
    #[error("feature count mismatch: {left} vs {right} segments")]
    FeatureCountMismatch {
        /// Length of the first (source) array.
        left: usize,
        /// Length of the second (target) array.
        right: usize,
    },

    /// Two images that must share width, height and channel count do not.
    #[error(
        "dimension mismatch: {}x{}x{} vs {}x{}x{}",
        .left.0, .left.1, .left.2, .right.0, .right.1, .right.2
    )]
    DimensionMismatch {
        /// `(width, height, channels)` of the first image.
        left: (u32, u32, u32),
        /// `(width, height, channels)` of the second image.
        right: (u32, u32, u32),
    },

    /// Malformed correspondence data.
    #[error("parse error: {0}")]
    Parse(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    /// Build a [`MorphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MorphError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
