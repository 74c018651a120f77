//! Wavecraft CLI library.
//!
//! Holds the command implementations behind the `wavecraft` binary, the
//! random batch driver and the parsers for waveform lists given on the
//! command line.

pub mod batch;
pub mod commands;
pub mod recipe;
