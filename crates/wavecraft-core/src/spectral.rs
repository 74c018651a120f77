//! Frequency-domain effects built on a [`FrequencyTransform`].
//!
//! Every effect goes through [`SpectralEffects::process`]: zero-pad to the
//! next power of two, forward, edit the bins, inverse, truncate, and scale
//! down if the round trip overshoots unit amplitude.

use std::f64::consts::PI;

use rand::Rng;
use wavecraft_spec::effects::AMOUNT_EPSILON;

use crate::error::CoreResult;
use crate::table::{normalize_peak, peak};
use crate::transform::{FrequencyBin, FrequencyTransform, RustFftTransform};

/// Normalized frequency of bin `i` out of `num_bins`, in [0, 1].
fn normalized_frequency(i: usize, num_bins: usize) -> f64 {
    if num_bins <= 1 {
        0.0
    } else {
        i as f64 / (num_bins - 1) as f64
    }
}

/// Scales bin magnitudes by `clamp(1 - amount * f^curve, 0, 1)`.
pub fn decay_bins(bins: &mut [FrequencyBin], amount: f64, curve: f64) {
    let num_bins = bins.len();
    for (i, bin) in bins.iter_mut().enumerate() {
        let f = normalized_frequency(i, num_bins);
        let factor = (1.0 - amount * f.powf(curve)).clamp(0.0, 1.0);
        bin.magnitude *= factor;
    }
}

/// Scales bin magnitudes by `clamp(1 + amount * (f - 0.5) * 2, 0, 2)`.
pub fn tilt_bins(bins: &mut [FrequencyBin], amount: f64) {
    let num_bins = bins.len();
    for (i, bin) in bins.iter_mut().enumerate() {
        let f = normalized_frequency(i, num_bins);
        let factor = (1.0 + amount * (f - 0.5) * 2.0).clamp(0.0, 2.0);
        bin.magnitude *= factor;
    }
}

/// Silences bins quieter than `threshold` times the loudest bin.
pub fn gate_bins(bins: &mut [FrequencyBin], threshold: f64) {
    let max = bins.iter().map(|b| b.magnitude).fold(0.0_f64, f64::max);
    let floor = max * threshold;
    for bin in bins.iter_mut() {
        if bin.magnitude < floor {
            bin.magnitude = 0.0;
        }
    }
}

/// Moves bin `i` to `i + shift`. DC stays put, bins shifted out of range
/// are dropped and vacated bins are silent.
pub fn shift_bins(bins: &mut [FrequencyBin], shift: i32) {
    if shift == 0 || bins.is_empty() {
        return;
    }
    let num_bins = bins.len() as i64;
    let mut shifted = vec![FrequencyBin::silent(); bins.len()];
    shifted[0] = bins[0];
    for (i, bin) in bins.iter().enumerate().skip(1) {
        let target = i as i64 + shift as i64;
        if target >= 1 && target < num_bins {
            shifted[target as usize] = *bin;
        }
    }
    bins.copy_from_slice(&shifted);
}

/// Blends each non-DC phase towards a uniform draw in [-pi, pi].
pub fn randomize_phase_bins<R: Rng + ?Sized>(bins: &mut [FrequencyBin], amount: f64, rng: &mut R) {
    for bin in bins.iter_mut().skip(1) {
        let random_phase = rng.gen_range(-PI..=PI);
        bin.phase = bin.phase * (1.0 - amount) + random_phase * amount;
    }
}

/// Spectral effect processor owning its transform.
#[derive(Debug)]
pub struct SpectralEffects<T: FrequencyTransform = RustFftTransform> {
    transform: T,
}

impl Default for SpectralEffects<RustFftTransform> {
    fn default() -> Self {
        Self::new(RustFftTransform::new())
    }
}

impl<T: FrequencyTransform> SpectralEffects<T> {
    /// Wraps a transform.
    pub fn new(transform: T) -> Self {
        Self { transform }
    }

    /// The underlying transform.
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Round-trips `samples` through the padded transform, letting
    /// `edit` change the bins in between.
    pub fn process(
        &mut self,
        samples: &mut [f64],
        edit: impl FnOnce(&mut [FrequencyBin]),
    ) -> CoreResult<()> {
        if samples.is_empty() {
            return Ok(());
        }
        let len = samples.len();
        let size = len.next_power_of_two();

        let mut padded = samples.to_vec();
        padded.resize(size, 0.0);

        let mut bins = self.transform.forward(&padded)?;
        edit(&mut bins);
        let output = self.transform.inverse(&bins, size)?;

        samples.copy_from_slice(&output[..len]);
        if peak(samples) > 1.0 {
            normalize_peak(samples);
        }
        Ok(())
    }

    /// Darkens the spectrum, more strongly towards the top bins.
    pub fn decay(&mut self, samples: &mut [f64], amount: f64, curve: f64) -> CoreResult<()> {
        if amount < AMOUNT_EPSILON {
            return Ok(());
        }
        self.process(samples, |bins| decay_bins(bins, amount, curve))
    }

    /// Tilts the spectrum around its midpoint.
    pub fn tilt(&mut self, samples: &mut [f64], amount: f64) -> CoreResult<()> {
        if amount.abs() < AMOUNT_EPSILON {
            return Ok(());
        }
        self.process(samples, |bins| tilt_bins(bins, amount))
    }

    /// Removes bins below a fraction of the loudest one.
    pub fn gate(&mut self, samples: &mut [f64], threshold: f64) -> CoreResult<()> {
        if threshold < AMOUNT_EPSILON {
            return Ok(());
        }
        self.process(samples, |bins| gate_bins(bins, threshold))
    }

    /// Shifts every non-DC bin by `shift` positions.
    pub fn shift(&mut self, samples: &mut [f64], shift: i32) -> CoreResult<()> {
        if shift == 0 {
            return Ok(());
        }
        self.process(samples, |bins| shift_bins(bins, shift))
    }

    /// Blends phases towards random values drawn from `rng`.
    pub fn randomize_phase<R: Rng + ?Sized>(
        &mut self,
        samples: &mut [f64],
        amount: f64,
        rng: &mut R,
    ) -> CoreResult<()> {
        if amount < AMOUNT_EPSILON {
            return Ok(());
        }
        self.process(samples, |bins| randomize_phase_bins(bins, amount, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use std::f64::consts::TAU;

    fn bins(mags: &[f64]) -> Vec<FrequencyBin> {
        mags.iter().map(|&m| FrequencyBin::new(m, 0.25)).collect()
    }

    fn harmonic_cycle(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 / n as f64;
                0.5 * (TAU * t).sin() + 0.3 * (TAU * 5.0 * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_decay_factors() {
        let mut b = bins(&[1.0, 1.0, 1.0]);
        decay_bins(&mut b, 0.5, 1.0);
        assert_eq!(b[0].magnitude, 1.0);
        assert_eq!(b[1].magnitude, 0.75);
        assert_eq!(b[2].magnitude, 0.5);

        let mut b = bins(&[1.0, 1.0]);
        decay_bins(&mut b, 3.0, 1.0);
        assert_eq!(b[1].magnitude, 0.0);
    }

    #[test]
    fn test_tilt_factors_are_clamped() {
        let mut b = bins(&[1.0, 1.0, 1.0]);
        tilt_bins(&mut b, 2.0);
        assert_eq!(b[0].magnitude, 0.0);
        assert_eq!(b[1].magnitude, 1.0);
        assert_eq!(b[2].magnitude, 2.0);
    }

    #[test]
    fn test_gate() {
        let mut b = bins(&[0.05, 1.0, 0.2, 0.09]);
        gate_bins(&mut b, 0.1);
        let mags: Vec<f64> = b.iter().map(|b| b.magnitude).collect();
        assert_eq!(mags, vec![0.0, 1.0, 0.2, 0.0]);
    }

    #[test]
    fn test_shift_up_and_down() {
        let mut b = bins(&[9.0, 1.0, 2.0, 3.0]);
        shift_bins(&mut b, 1);
        let mags: Vec<f64> = b.iter().map(|b| b.magnitude).collect();
        assert_eq!(mags, vec![9.0, 0.0, 1.0, 2.0]);

        let mut b = bins(&[9.0, 1.0, 2.0, 3.0]);
        shift_bins(&mut b, -2);
        let mags: Vec<f64> = b.iter().map(|b| b.magnitude).collect();
        assert_eq!(mags, vec![9.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_phase_randomization_keeps_dc_and_magnitudes() {
        let mut b = bins(&[1.0, 2.0, 3.0]);
        let mut rng = create_rng(5);
        randomize_phase_bins(&mut b, 1.0, &mut rng);
        assert_eq!(b[0].phase, 0.25);
        assert_eq!(b[2].magnitude, 3.0);
        assert!(b[1..].iter().all(|b| (-PI..=PI).contains(&b.phase)));
    }

    #[test]
    fn test_zero_shift_is_identity_through_process() {
        let original = harmonic_cycle(2048);
        let mut samples = original.clone();
        let mut fx = SpectralEffects::default();
        fx.process(&mut samples, |bins| shift_bins(bins, 0)).unwrap();
        for (a, b) in original.iter().zip(&samples) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_padding_handles_odd_lengths() {
        let mut samples = harmonic_cycle(1000);
        let mut fx = SpectralEffects::default();
        fx.decay(&mut samples, 0.8, 1.0).unwrap();
        assert_eq!(samples.len(), 1000);
        assert_eq!(fx.transform().size(), 1024);
    }

    #[test]
    fn test_gate_keeps_fundamental() {
        let n = 256;
        let mut samples = harmonic_cycle(n);
        let mut fx = SpectralEffects::default();
        fx.gate(&mut samples, 0.9).unwrap();
        // Only the fundamental survives the gate.
        for (i, s) in samples.iter().enumerate() {
            let expected = 0.5 * (TAU * i as f64 / n as f64).sin();
            assert!((s - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_negligible_amounts_skip_processing() {
        let mut samples = vec![0.0, 2.0, -2.0];
        let mut fx = SpectralEffects::default();
        fx.decay(&mut samples, 0.0, 1.0).unwrap();
        fx.tilt(&mut samples, 0.0).unwrap();
        fx.gate(&mut samples, 0.0).unwrap();
        fx.shift(&mut samples, 0).unwrap();
        assert_eq!(samples, vec![0.0, 2.0, -2.0]);
        assert_eq!(fx.transform().size(), 0);
    }

    #[test]
    fn test_overshoot_is_rescaled() {
        let mut samples = vec![0.0, 2.0, -2.0, 0.0];
        let mut fx = SpectralEffects::default();
        fx.tilt(&mut samples, 0.01).unwrap();
        assert!(peak(&samples) <= 1.0 + 1e-12);
    }
}
