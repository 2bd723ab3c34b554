/// Convenience result type used across SnapBunny.
pub type SnapResult<T> = Result<T, SnapError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Individual source-image and frame-asset failures are tolerated inside the
/// pipelines (the slot or overlay is simply left blank) and never surface
/// through this type; what does surface is invalid composition data, codec
/// failures on the export path, and wrapped IO errors.
#[derive(thiserror::Error, Debug)]
pub enum SnapError {
    /// Invalid user-provided layout or composition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while decoding image or font bytes.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while encoding an export artifact.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SnapError {
    /// Build a [`SnapError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SnapError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SnapError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
