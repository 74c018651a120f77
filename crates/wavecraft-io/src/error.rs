//! Error types for the wavetable codecs.

use std::path::PathBuf;

use thiserror::Error;
use wavecraft_spec::{CodedError, SpecError};

/// Result type for codec operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while writing or importing wavetables.
#[derive(Debug, Error)]
pub enum IoError {
    /// Underlying file or stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV container error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// A `.wt` file does not start with `vawt`.
    #[error("not a .wt file: magic is {found:?}")]
    InvalidMagic {
        /// The four bytes found instead.
        found: [u8; 4],
    },

    /// Frame size is zero or not a power of two.
    #[error("invalid samples per frame: {size}")]
    InvalidFrameSize {
        /// Size read from the header.
        size: u32,
    },

    /// Frame count is outside `1..=16384`.
    #[error("invalid frame count: {count}")]
    InvalidFrameCount {
        /// Count read from the header.
        count: u32,
    },

    /// The file uses a layout the importer does not read.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file extension is neither `.wt` nor `.wav`.
    #[error("unsupported file extension: {}", path.display())]
    UnknownExtension {
        /// Offending path.
        path: PathBuf,
    },

    /// The table failed its output post-conditions.
    #[error(transparent)]
    Spec(#[from] SpecError),
}

impl CodedError for IoError {
    fn code(&self) -> &'static str {
        match self {
            IoError::Io(_) => "IO_001",
            IoError::Wav(_) => "IO_002",
            IoError::InvalidMagic { .. } => "IO_003",
            IoError::InvalidFrameSize { .. } => "IO_004",
            IoError::InvalidFrameCount { .. } => "IO_005",
            IoError::UnsupportedFormat(_) => "IO_006",
            IoError::UnknownExtension { .. } => "IO_007",
            IoError::Spec(inner) => inner.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            IoError::Spec(inner) => inner.category(),
            _ => "io",
        }
    }
}
