//! Wavecraft spec types.
//!
//! This crate holds the canonical data model shared by the synthesis core,
//! the file codecs and the command-line front end:
//!
//! - [`WaveformKind`] - the closed catalogue of oscillator recipes
//! - [`WeightedWaveform`] / [`WavetableFrame`] - how one cycle is blended
//! - [`MorphCurve`] - position remapping between a start and end frame
//! - [`EffectsConfiguration`] - the flat effect toggle/parameter record
//! - [`GenerationRequest`] - a complete JSON-serializable generation recipe
//! - [`validation`] - output post-conditions (sample count, silence)
//!
//! # Example
//!
//! ```
//! use wavecraft_spec::{GenerationRequest, WaveformKind, WavetableFrame};
//!
//! let request = GenerationRequest::single(WavetableFrame::single(WaveformKind::Saw, 1.0));
//! request.validate().unwrap();
//! assert_eq!(request.num_frames, 1);
//! ```

pub mod curve;
pub mod effects;
pub mod error;
pub mod frame;
pub mod kind;
pub mod request;
pub mod validation;

pub use curve::MorphCurve;
pub use effects::{DistortionKind, EffectsConfiguration};
pub use error::{CodedError, SpecError, SpecResult};
pub use frame::{WavetableFrame, WeightedWaveform};
pub use kind::{ParseWaveformKindError, WaveformFamily, WaveformKind};
pub use request::{GenerationRequest, OutputFormat};
pub use validation::validate_table;

/// Number of samples in one waveform cycle.
pub const SAMPLES_PER_CYCLE: usize = 2048;

/// Sample rate written into every output file, in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Length of the audio preview loop in seconds.
pub const PREVIEW_SECONDS: u32 = 2;

/// Harmonic limit used when a request does not set one.
pub const DEFAULT_MAX_HARMONICS: u32 = 8;

/// Pulse duty cycle used when a request does not set one.
pub const DEFAULT_PULSE_DUTY: f64 = 0.5;
