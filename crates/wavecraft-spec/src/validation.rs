//! Post-conditions every generated table must satisfy before it is written.

use crate::error::{SpecError, SpecResult};

/// Checks that `samples` holds exactly `num_frames * samples_per_frame`
/// values and is not entirely silent.
pub fn validate_table(samples: &[f64], num_frames: usize, samples_per_frame: usize) -> SpecResult<()> {
    let expected = num_frames * samples_per_frame;
    if samples.len() != expected {
        return Err(SpecError::InvalidSampleCount {
            expected,
            actual: samples.len(),
        });
    }
    if samples.iter().all(|&s| s == 0.0) {
        return Err(SpecError::AllSamplesZero);
    }
    Ok(())
}
