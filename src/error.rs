use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProbeError>;

/// Errors raised before any probing starts. Probe failures never surface here,
/// they are folded into [`crate::ProbeStatus`] sentinels instead.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("product code '{code}' needs at least {min} characters (a prefix and {width} digits)")]
    CodeTooShort { code: String, min: usize, width: usize },

    #[error("product code '{0}' does not end in a numeric suffix")]
    NonNumericSuffix(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        ProbeError::InvalidConfig(msg.into())
    }
}
