//! Error types for the synthesis core.

use thiserror::Error;
use wavecraft_spec::{CodedError, SpecError};

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while generating or analyzing tables.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No waveforms were selected for the start frame.
    #[error("no waveforms selected")]
    EmptyWaveforms,

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// A frequency transform was asked for a size it cannot handle.
    #[error("transform size {size} is not a non-zero power of two")]
    InvalidTransformSize {
        /// Requested block size.
        size: usize,
    },

    /// A spectrum does not have `size / 2 + 1` bins.
    #[error("spectrum has {actual} bins, expected {expected}")]
    BinCountMismatch {
        /// Expected bin count.
        expected: usize,
        /// Actual bin count.
        actual: usize,
    },

    /// Request or output validation failed.
    #[error(transparent)]
    Spec(#[from] SpecError),
}

impl CoreError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl CodedError for CoreError {
    fn code(&self) -> &'static str {
        match self {
            CoreError::EmptyWaveforms => "CORE_001",
            CoreError::InvalidParameter { .. } => "CORE_002",
            CoreError::InvalidTransformSize { .. } => "CORE_003",
            CoreError::BinCountMismatch { .. } => "CORE_004",
            CoreError::Spec(inner) => inner.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            CoreError::Spec(inner) => inner.category(),
            _ => "core",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = CoreError::invalid_param("num_frames", "must be at least 1");
        assert!(err.to_string().contains("num_frames"));
        assert_eq!(err.code(), "CORE_002");
    }

    #[test]
    fn test_spec_errors_keep_their_code() {
        let err: CoreError = SpecError::AllSamplesZero.into();
        assert_eq!(err.code(), "SPEC_003");
        assert_eq!(err.category(), "spec");
        assert_eq!(err.to_string(), "all samples are zero");
    }
}
