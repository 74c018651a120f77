//! Wavecraft synthesis core
//!
//! This crate turns [`GenerationRequest`](wavecraft_spec::GenerationRequest)s into wavetables and matches
//! arbitrary cycles back onto its own oscillators.
//!
//! # Overview
//!
//! - **Oscillator bank** - 72 band-limited or closed-form cycle recipes
//! - **Frame combiner** - weighted blends and start-to-end morphs with one
//!   global normalization pass per table
//! - **Effects pipeline** - symmetry, oversampled nonlinear shapers, one-pole
//!   filters and frequency-domain effects
//! - **Matcher** - correlation and spectral classification of foreign cycles
//!
//! # Determinism
//!
//! Generation is deterministic. The only random sources (Karplus-Strong
//! excitation and phase randomization) use PCG32 with seeds derived via
//! BLAKE3, so identical requests give identical samples.
//!
//! # Example
//!
//! ```
//! use wavecraft_core::generate_wavetable;
//! use wavecraft_spec::{GenerationRequest, WaveformKind, WavetableFrame};
//!
//! let request = GenerationRequest::morphing(
//!     WavetableFrame::single(WaveformKind::Saw, 1.0),
//!     None,
//!     16,
//! );
//! let table = generate_wavetable(&request).unwrap();
//! assert_eq!(table.num_frames, 16);
//! assert_eq!(table.samples.len(), 16 * 2048);
//! ```
//!
//! # Crate Structure
//!
//! - [`generate_wavetable()`] - request entry point
//! - [`oscillator`] - per-kind cycle recipes
//! - [`combiner`] - frame blending and morphing
//! - [`effects`] - the time-domain pipeline
//! - [`spectral`] / [`transform`] - frequency-domain effects and the FFT seam
//! - [`matcher`] - waveform analysis
//! - [`rng`] - deterministic RNG with seed derivation

pub mod combiner;
pub mod effects;
pub mod error;
pub mod generate;
pub mod matcher;
pub mod oscillator;
pub mod rng;
pub mod spectral;
pub mod table;
pub mod transform;

pub use combiner::{combine, implicit_end_frame, morph};
pub use effects::EffectsPipeline;
pub use error::{CoreError, CoreResult};
pub use generate::{derive_filename_tag, generate_wavetable, GeneratedTable, WavetableGenerator};
pub use matcher::{analyze_by_correlation, analyze_by_spectrum, MatchMethod, WaveformMatcher};
pub use oscillator::{generate_cycle, CycleParams};
pub use table::Wavetable;
pub use transform::{FrequencyBin, FrequencyTransform, RustFftTransform};
