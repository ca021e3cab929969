/// Result alias that carries the custom [`WaveMatchError`] type.
pub type Result<T> = std::result::Result<T, WaveMatchError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum WaveMatchError {
    /// Free-form message for failures that do not warrant their own variant.
    #[error("{0}")]
    Message(String),
    /// A wave or surface parameter failed validation. Geometry parameters
    /// must be finite, and `wavelength`/`segment_length` must be non-zero.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON (de)serialization errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl WaveMatchError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<&str> for WaveMatchError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for WaveMatchError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
