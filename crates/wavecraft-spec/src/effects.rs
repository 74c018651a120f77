//! Effect toggles and parameters.

use serde::{Deserialize, Serialize};

/// Waveshaping curve used by the distortion stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistortionKind {
    /// Distortion disabled.
    #[default]
    None,
    /// `tanh` saturation with drive 1x-10x.
    Soft,
    /// Symmetric clipping with the threshold shrinking from 1.0 to 0.1.
    Hard,
    /// `tanh` saturation with half drive on negative samples.
    #[serde(alias = "asym")]
    Asymmetric,
}

impl DistortionKind {
    /// Abbreviation used in file name tags.
    pub fn tag(&self) -> &'static str {
        match self {
            DistortionKind::None => "",
            DistortionKind::Soft => "Soft",
            DistortionKind::Hard => "Hard",
            DistortionKind::Asymmetric => "Asym",
        }
    }
}

/// Flat record of every effect toggle and parameter.
///
/// Amounts and cutoffs are normalized to 0.0-1.0 unless noted. The record is
/// passed by value into the effects pipeline and never mutated by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfiguration {
    /// Play the cycle backwards.
    pub reverse: bool,
    /// Second half mirrors the first half.
    pub mirror_horizontal: bool,
    /// Negate every sample.
    pub mirror_vertical: bool,
    /// Negate every sample (applied after `mirror_vertical`).
    pub invert: bool,

    /// Distortion curve.
    pub distortion: DistortionKind,
    /// Distortion amount.
    pub distortion_amount: f64,

    /// Enable the wavefolder.
    pub wavefold_enabled: bool,
    /// Fold gain amount, mapped to 1x-4x.
    pub wavefold_amount: f64,

    /// Enable bit crushing.
    pub bitcrush_enabled: bool,
    /// Bit depth, 1-16. 16 disables the stage.
    pub bit_depth: u32,

    /// Sample-and-hold length in native samples. 0 or 1 disables the stage.
    pub sample_rate_reduction: u32,

    /// Enable the one-pole low-pass.
    pub lowpass_enabled: bool,
    /// Low-pass coefficient; 1.0 passes everything.
    pub lowpass_cutoff: f64,
    /// Enable the one-pole high-pass.
    pub highpass_enabled: bool,
    /// High-pass coefficient; 0.0 passes everything.
    pub highpass_cutoff: f64,

    /// Enable spectral decay.
    pub spectral_decay_enabled: bool,
    /// Spectral decay amount.
    pub spectral_decay_amount: f64,
    /// Exponent applied to the normalized bin index (1.0 = linear).
    pub spectral_decay_curve: f64,

    /// Enable spectral tilt.
    pub spectral_tilt_enabled: bool,
    /// Tilt amount in -1.0..=1.0.
    pub spectral_tilt: f64,

    /// Enable the spectral gate.
    pub spectral_gate_enabled: bool,
    /// Gate threshold as a fraction of the loudest bin.
    pub spectral_gate_threshold: f64,

    /// Enable phase randomization.
    pub phase_randomize_enabled: bool,
    /// Blend between original and random phase.
    pub phase_randomize_amount: f64,

    /// Bin offset for the spectral shift. 0 disables the stage.
    pub spectral_shift: i32,

    /// Seed for phase randomization.
    pub seed: u32,
}

impl Default for EffectsConfiguration {
    fn default() -> Self {
        Self {
            reverse: false,
            mirror_horizontal: false,
            mirror_vertical: false,
            invert: false,
            distortion: DistortionKind::None,
            distortion_amount: 0.0,
            wavefold_enabled: false,
            wavefold_amount: 0.0,
            bitcrush_enabled: false,
            bit_depth: 16,
            sample_rate_reduction: 1,
            lowpass_enabled: false,
            lowpass_cutoff: 1.0,
            highpass_enabled: false,
            highpass_cutoff: 0.0,
            spectral_decay_enabled: false,
            spectral_decay_amount: 0.0,
            spectral_decay_curve: 1.0,
            spectral_tilt_enabled: false,
            spectral_tilt: 0.0,
            spectral_gate_enabled: false,
            spectral_gate_threshold: 0.0,
            phase_randomize_enabled: false,
            phase_randomize_amount: 0.0,
            spectral_shift: 0,
            seed: 0,
        }
    }
}

/// Amounts at or below this are treated as off.
pub const AMOUNT_EPSILON: f64 = 0.001;

impl EffectsConfiguration {
    /// Returns true if the distortion stage will run.
    pub fn distortion_active(&self) -> bool {
        self.distortion != DistortionKind::None && self.distortion_amount > AMOUNT_EPSILON
    }

    /// Returns true if the wavefold stage will run.
    pub fn wavefold_active(&self) -> bool {
        self.wavefold_enabled && self.wavefold_amount > AMOUNT_EPSILON
    }

    /// Returns true if the bit crusher will run.
    pub fn bitcrush_active(&self) -> bool {
        self.bitcrush_enabled && self.bit_depth < 16
    }

    /// Returns true if sample-rate reduction will run.
    pub fn sample_rate_reduction_active(&self) -> bool {
        self.sample_rate_reduction > 1
    }

    /// Returns true if any stage needs the oversampling wrapper.
    pub fn needs_oversampling(&self) -> bool {
        self.distortion_active()
            || self.wavefold_active()
            || self.bitcrush_active()
            || self.sample_rate_reduction_active()
    }

    /// Returns true if the high-pass will run.
    pub fn highpass_active(&self) -> bool {
        self.highpass_enabled && self.highpass_cutoff > AMOUNT_EPSILON
    }

    /// Returns true if the low-pass will run.
    pub fn lowpass_active(&self) -> bool {
        self.lowpass_enabled && self.lowpass_cutoff < 1.0 - AMOUNT_EPSILON
    }

    /// Returns true if spectral decay will run.
    pub fn spectral_decay_active(&self) -> bool {
        self.spectral_decay_enabled && self.spectral_decay_amount > AMOUNT_EPSILON
    }

    /// Returns true if spectral tilt will run.
    pub fn spectral_tilt_active(&self) -> bool {
        self.spectral_tilt_enabled && self.spectral_tilt.abs() > AMOUNT_EPSILON
    }

    /// Returns true if the spectral gate will run.
    pub fn spectral_gate_active(&self) -> bool {
        self.spectral_gate_enabled && self.spectral_gate_threshold > AMOUNT_EPSILON
    }

    /// Returns true if phase randomization will run.
    pub fn phase_randomize_active(&self) -> bool {
        self.phase_randomize_enabled && self.phase_randomize_amount > AMOUNT_EPSILON
    }

    /// Returns true if the spectral shift will run.
    pub fn spectral_shift_active(&self) -> bool {
        self.spectral_shift != 0
    }

    /// Returns true if any frequency-domain stage will run.
    pub fn has_spectral(&self) -> bool {
        self.spectral_decay_active()
            || self.spectral_tilt_active()
            || self.spectral_gate_active()
            || self.spectral_shift_active()
            || self.phase_randomize_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_transparent() {
        let fx = EffectsConfiguration::default();
        assert!(!fx.needs_oversampling());
        assert!(!fx.lowpass_active());
        assert!(!fx.highpass_active());
        assert!(!fx.has_spectral());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let fx: EffectsConfiguration =
            serde_json::from_str(r#"{"distortion":"soft","distortion_amount":0.4}"#).unwrap();
        assert_eq!(fx.distortion, DistortionKind::Soft);
        assert_eq!(fx.bit_depth, 16);
        assert_eq!(fx.lowpass_cutoff, 1.0);
        assert!(fx.distortion_active());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<EffectsConfiguration, _> = serde_json::from_str(r#"{"reverb":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_enable_flags_gate_amounts() {
        let fx = EffectsConfiguration {
            wavefold_amount: 0.5,
            bit_depth: 4,
            ..Default::default()
        };
        assert!(!fx.wavefold_active());
        assert!(!fx.bitcrush_active());

        let fx = EffectsConfiguration {
            bitcrush_enabled: true,
            ..fx
        };
        assert!(fx.bitcrush_active());
        assert!(fx.needs_oversampling());
    }
}
