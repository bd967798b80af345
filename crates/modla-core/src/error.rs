//! Shared error type across modla crates.
//!
//! Only the setup paths (configuration, instantiation) can fail. Per-block
//! operations are infallible and never touch this type.

use thiserror::Error;

/// Stable error codes for reporting (log fields, C callers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration rejected (parse or range).
    BadConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Sample rate unusable for timing resolution.
    InvalidSampleRate,
    /// Internal failure (IO, invariant).
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::InvalidSampleRate => "INVALID_SAMPLE_RATE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ModlaError>;

/// Unified error type used by core and plugin layers.
#[derive(Debug, Error)]
pub enum ModlaError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f64),
    #[error("internal: {0}")]
    Internal(String),
}

impl ModlaError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ModlaError::BadConfig(_) => ErrorCode::BadConfig,
            ModlaError::UnsupportedVersion(_) => ErrorCode::UnsupportedVersion,
            ModlaError::InvalidSampleRate(_) => ErrorCode::InvalidSampleRate,
            ModlaError::Internal(_) => ErrorCode::Internal,
        }
    }
}
