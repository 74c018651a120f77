//! Error types for request validation and output post-conditions.

use thiserror::Error;

/// Result type for spec-level operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Common interface for the error enums of every wavecraft crate.
///
/// Codes are stable strings like `"SPEC_001"` or `"CORE_002"` and can be
/// matched programmatically by callers that only see a boxed error.
pub trait CodedError: std::error::Error {
    /// Stable machine-readable code.
    fn code(&self) -> &'static str;

    /// Human-readable message, normally the `Display` output.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Grouping such as `"spec"`, `"core"` or `"io"`.
    fn category(&self) -> &'static str;
}

/// Errors raised while validating requests or generated tables.
#[derive(Debug, Error)]
pub enum SpecError {
    /// No waveforms were selected for the start frame.
    #[error("no waveforms selected")]
    EmptyWaveforms,

    /// A table's length is not `frames * samples_per_frame`.
    #[error("invalid sample count: expected {expected}, found {actual}")]
    InvalidSampleCount {
        /// Expected number of samples.
        expected: usize,
        /// Actual number of samples.
        actual: usize,
    },

    /// Every sample of a table is exactly zero.
    #[error("all samples are zero")]
    AllSamplesZero,

    /// A request field is outside its accepted range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Field name.
        name: String,
        /// What is wrong with it.
        message: String,
    },

    /// Request JSON could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpecError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl CodedError for SpecError {
    fn code(&self) -> &'static str {
        match self {
            SpecError::EmptyWaveforms => "SPEC_001",
            SpecError::InvalidSampleCount { .. } => "SPEC_002",
            SpecError::AllSamplesZero => "SPEC_003",
            SpecError::InvalidParameter { .. } => "SPEC_004",
            SpecError::Json(_) => "SPEC_005",
        }
    }

    fn category(&self) -> &'static str {
        "spec"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = SpecError::invalid_param("num_frames", "must be at least 1");
        assert!(err.to_string().contains("num_frames"));
        assert!(err.to_string().contains("at least 1"));
        assert_eq!(err.code(), "SPEC_004");
    }

    #[test]
    fn test_sample_count_message() {
        let err = SpecError::InvalidSampleCount {
            expected: 4096,
            actual: 100,
        };
        assert_eq!(
            err.message(),
            "invalid sample count: expected 4096, found 100"
        );
        assert_eq!(err.category(), "spec");
    }
}
