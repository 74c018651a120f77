//! Per-cycle effects pipeline.
//!
//! Stages always run in the same order:
//!
//! 1. symmetry (reverse, horizontal mirror, vertical mirror, invert)
//! 2. nonlinear shapers inside one shared 4x oversampling pass
//!    (distortion, wavefold, bit crush, sample-rate reduction)
//! 3. high-pass then low-pass
//! 4. spectral stages (decay, tilt, gate, shift, phase randomization)
//!
//! Disabled or negligible stages are skipped, so the default configuration
//! leaves a cycle untouched.

pub mod distortion;
pub mod filter;
pub mod oversample;
pub mod symmetry;

use log::trace;
use wavecraft_spec::EffectsConfiguration;

use crate::error::CoreResult;
use crate::rng::create_frame_rng;
use crate::spectral::SpectralEffects;
use crate::transform::{FrequencyTransform, RustFftTransform};

/// Applies an [`EffectsConfiguration`] to cycles.
///
/// The pipeline owns the frequency transform used by its spectral stages;
/// the transform re-plans itself whenever the cycle length changes.
#[derive(Debug)]
pub struct EffectsPipeline<T: FrequencyTransform = RustFftTransform> {
    spectral: SpectralEffects<T>,
}

impl Default for EffectsPipeline<RustFftTransform> {
    fn default() -> Self {
        Self::new(RustFftTransform::new())
    }
}

impl<T: FrequencyTransform> EffectsPipeline<T> {
    /// Creates a pipeline around an explicit transform.
    pub fn new(transform: T) -> Self {
        Self {
            spectral: SpectralEffects::new(transform),
        }
    }

    /// The spectral processor used for stage 4.
    pub fn spectral(&self) -> &SpectralEffects<T> {
        &self.spectral
    }

    /// Runs every active stage over `samples` in place.
    ///
    /// `frame_index` selects the phase-randomization stream so each frame of
    /// a table gets independent but reproducible phases.
    pub fn apply(
        &mut self,
        samples: &mut [f64],
        fx: &EffectsConfiguration,
        frame_index: u32,
    ) -> CoreResult<()> {
        if samples.is_empty() {
            return Ok(());
        }

        if fx.reverse {
            symmetry::reverse(samples);
        }
        if fx.mirror_horizontal {
            symmetry::mirror_horizontal(samples);
        }
        if fx.mirror_vertical {
            symmetry::negate(samples);
        }
        if fx.invert {
            symmetry::negate(samples);
        }

        if fx.needs_oversampling() {
            trace!("frame {}: oversampled stages", frame_index);
            oversample::with_oversampling(samples, |os| apply_nonlinear(os, fx));
        }

        if fx.highpass_active() {
            filter::highpass(samples, fx.highpass_cutoff);
        }
        if fx.lowpass_active() {
            filter::lowpass(samples, fx.lowpass_cutoff);
        }

        if fx.has_spectral() {
            trace!("frame {}: spectral stages", frame_index);
            self.apply_spectral(samples, fx, frame_index)?;
        }
        Ok(())
    }

    fn apply_spectral(
        &mut self,
        samples: &mut [f64],
        fx: &EffectsConfiguration,
        frame_index: u32,
    ) -> CoreResult<()> {
        if fx.spectral_decay_active() {
            self.spectral
                .decay(samples, fx.spectral_decay_amount, fx.spectral_decay_curve)?;
        }
        if fx.spectral_tilt_active() {
            self.spectral.tilt(samples, fx.spectral_tilt)?;
        }
        if fx.spectral_gate_active() {
            self.spectral.gate(samples, fx.spectral_gate_threshold)?;
        }
        if fx.spectral_shift_active() {
            self.spectral.shift(samples, fx.spectral_shift)?;
        }
        if fx.phase_randomize_active() {
            let mut rng = create_frame_rng(fx.seed, frame_index);
            self.spectral
                .randomize_phase(samples, fx.phase_randomize_amount, &mut rng)?;
        }
        Ok(())
    }
}

/// Stage 2 at the oversampled rate.
fn apply_nonlinear(samples: &mut [f64], fx: &EffectsConfiguration) {
    if fx.distortion_active() {
        distortion::apply_distortion(samples, fx.distortion, fx.distortion_amount);
    }
    if fx.wavefold_active() {
        distortion::apply_wavefold(samples, fx.wavefold_amount);
    }
    if fx.bitcrush_active() {
        distortion::apply_bitcrush(samples, fx.bit_depth);
    }
    if fx.sample_rate_reduction_active() {
        let hold = fx.sample_rate_reduction as usize * oversample::FACTOR;
        distortion::apply_sample_hold(samples, hold);
    }
}
