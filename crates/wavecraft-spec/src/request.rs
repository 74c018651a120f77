//! Complete generation requests.

use serde::{Deserialize, Serialize};

use crate::curve::MorphCurve;
use crate::effects::EffectsConfiguration;
use crate::error::{SpecError, SpecResult};
use crate::frame::WavetableFrame;
use crate::{DEFAULT_MAX_HARMONICS, DEFAULT_PULSE_DUTY};

/// Container format for generated tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Raw float wavetable with a `vawt` header.
    #[default]
    Wt,
    /// Mono 16-bit PCM WAV.
    Wav,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Wt => "wt",
            OutputFormat::Wav => "wav",
        }
    }

    /// Guesses the format from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "wt" => Some(OutputFormat::Wt),
            "wav" => Some(OutputFormat::Wav),
            _ => None,
        }
    }
}

fn default_num_frames() -> u32 {
    1
}

fn default_pulse_duty() -> f64 {
    DEFAULT_PULSE_DUTY
}

fn default_max_harmonics() -> u32 {
    DEFAULT_MAX_HARMONICS
}

/// Everything needed to produce one wavetable or preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationRequest {
    /// Start frame recipe.
    pub start: WavetableFrame,
    /// Optional end frame; derived from `start` when morphing without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<WavetableFrame>,
    /// Morph between start and end frames.
    #[serde(default)]
    pub morph: bool,
    /// Number of frames when morphing.
    #[serde(default = "default_num_frames")]
    pub num_frames: u32,
    /// Morph curve.
    #[serde(default)]
    pub curve: MorphCurve,
    /// Duty cycle for the pulse kind, exclusive range (0, 1).
    #[serde(default = "default_pulse_duty")]
    pub pulse_duty: f64,
    /// Harmonic limit for the additive kinds.
    #[serde(default = "default_max_harmonics")]
    pub max_harmonics: u32,
    /// Produce a two-second audio preview instead of a table.
    #[serde(default)]
    pub preview: bool,
    /// Output container.
    #[serde(default)]
    pub format: OutputFormat,
    /// Effects applied to every frame.
    #[serde(default)]
    pub effects: EffectsConfiguration,
    /// Seed for noise-driven oscillator kinds.
    #[serde(default)]
    pub seed: u32,
}

impl GenerationRequest {
    /// Creates a single-frame request with default settings.
    pub fn single(start: WavetableFrame) -> Self {
        Self {
            start,
            end: None,
            morph: false,
            num_frames: 1,
            curve: MorphCurve::Linear,
            pulse_duty: DEFAULT_PULSE_DUTY,
            max_harmonics: DEFAULT_MAX_HARMONICS,
            preview: false,
            format: OutputFormat::Wt,
            effects: EffectsConfiguration::default(),
            seed: 0,
        }
    }

    /// Creates a morphing request with default settings.
    pub fn morphing(start: WavetableFrame, end: Option<WavetableFrame>, num_frames: u32) -> Self {
        Self {
            end,
            morph: true,
            num_frames,
            ..Self::single(start)
        }
    }

    /// Parses a request from JSON.
    pub fn from_json(json: &str) -> SpecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the request as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> SpecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the request before any generation work.
    pub fn validate(&self) -> SpecResult<()> {
        if self.start.is_empty() {
            return Err(SpecError::EmptyWaveforms);
        }
        if self.morph && self.num_frames == 0 {
            return Err(SpecError::invalid_param(
                "num_frames",
                "must be at least 1 when morphing",
            ));
        }
        if self.max_harmonics == 0 {
            return Err(SpecError::invalid_param(
                "max_harmonics",
                "must be at least 1",
            ));
        }
        if !(self.pulse_duty > 0.0 && self.pulse_duty < 1.0) {
            return Err(SpecError::invalid_param(
                "pulse_duty",
                format!("must be in (0, 1), got {}", self.pulse_duty),
            ));
        }
        if !(1..=16).contains(&self.effects.bit_depth) {
            return Err(SpecError::invalid_param(
                "effects.bit_depth",
                format!("must be in 1..=16, got {}", self.effects.bit_depth),
            ));
        }
        let weights = self
            .start
            .iter()
            .chain(self.end.iter().flat_map(|f| f.iter()));
        for wave in weights {
            if !wave.weight.is_finite() {
                return Err(SpecError::invalid_param(
                    "weight",
                    format!("{} has a non-finite weight", wave.kind),
                ));
            }
        }
        Ok(())
    }

    /// Number of frames the request produces.
    pub fn frame_count(&self) -> u32 {
        if self.morph {
            self.num_frames
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::WaveformKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_json() {
        let request =
            GenerationRequest::from_json(r#"{"start":[{"kind":"Saw","weight":1.0}]}"#).unwrap();
        assert_eq!(
            request,
            GenerationRequest::single(WavetableFrame::single(WaveformKind::Saw, 1.0))
        );
        request.validate().unwrap();
    }

    #[test]
    fn test_json_round_trip() {
        let mut request = GenerationRequest::morphing(
            WavetableFrame::single(WaveformKind::Sine, 1.0),
            Some(WavetableFrame::single(WaveformKind::Square, 0.5)),
            64,
        );
        request.curve = MorphCurve::SCurve;
        request.effects.bitcrush_enabled = true;
        request.effects.bit_depth = 6;
        let json = request.to_json_pretty().unwrap();
        assert_eq!(GenerationRequest::from_json(&json).unwrap(), request);
    }

    #[test]
    fn test_validate_rejects_empty_start() {
        let request = GenerationRequest::single(WavetableFrame::default());
        assert!(matches!(
            request.validate(),
            Err(SpecError::EmptyWaveforms)
        ));
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        let base = GenerationRequest::single(WavetableFrame::single(WaveformKind::Pulse, 1.0));

        let mut request = base.clone();
        request.pulse_duty = 1.0;
        assert!(request.validate().is_err());

        let mut request = base.clone();
        request.max_harmonics = 0;
        assert!(request.validate().is_err());

        let mut request = base.clone();
        request.morph = true;
        request.num_frames = 0;
        assert!(request.validate().is_err());

        let mut request = base;
        request.effects.bit_depth = 0;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_frame_count() {
        let mut request =
            GenerationRequest::single(WavetableFrame::single(WaveformKind::Sine, 1.0));
        request.num_frames = 32;
        assert_eq!(request.frame_count(), 1);
        request.morph = true;
        assert_eq!(request.frame_count(), 32);
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::from_extension("WAV"), Some(OutputFormat::Wav));
        assert_eq!(OutputFormat::from_extension("flac"), None);
        assert_eq!(OutputFormat::Wt.extension(), "wt");
    }
}
