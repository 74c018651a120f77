//! Request-level entry points: table generation, audio preview and file
//! name tags.

use std::fmt::Write as _;

use log::debug;
use wavecraft_spec::{
    validate_table, GenerationRequest, MorphCurve, WavetableFrame, PREVIEW_SECONDS, SAMPLES_PER_CYCLE,
    SAMPLE_RATE,
};

use crate::combiner::{combine, implicit_end_frame, morph};
use crate::effects::EffectsPipeline;
use crate::error::{CoreError, CoreResult};
use crate::oscillator::CycleParams;
use crate::table::normalize_peak;
use crate::transform::{FrequencyTransform, RustFftTransform};

/// Length of the preview fade in and fade out (50 ms).
pub const PREVIEW_FADE_SAMPLES: usize = SAMPLE_RATE as usize / 20;

/// Output of a generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTable {
    /// Frame-major samples.
    pub samples: Vec<f64>,
    /// Number of frames. Always 1 for a preview.
    pub num_frames: usize,
    /// Samples per frame. For a preview this is the whole buffer.
    pub samples_per_frame: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// True if this is an audio preview rather than a table.
    pub preview: bool,
}

impl GeneratedTable {
    /// Returns frame `index`, if present.
    pub fn frame(&self, index: usize) -> Option<&[f64]> {
        if index >= self.num_frames {
            return None;
        }
        let start = index * self.samples_per_frame;
        self.samples.get(start..start + self.samples_per_frame)
    }
}

/// Turns requests into tables, reusing one effects pipeline (and therefore
/// one frequency transform) across calls.
#[derive(Debug)]
pub struct WavetableGenerator<T: FrequencyTransform = RustFftTransform> {
    pipeline: EffectsPipeline<T>,
}

impl Default for WavetableGenerator<RustFftTransform> {
    fn default() -> Self {
        Self::new(RustFftTransform::new())
    }
}

impl<T: FrequencyTransform> WavetableGenerator<T> {
    /// Creates a generator whose spectral stages run on `transform`.
    pub fn new(transform: T) -> Self {
        Self {
            pipeline: EffectsPipeline::new(transform),
        }
    }

    /// Generates a single frame, a morphing table or a preview.
    ///
    /// Rejects an empty start frame before any synthesis work and checks the
    /// finished table with [`validate_table`].
    pub fn generate(&mut self, request: &GenerationRequest) -> CoreResult<GeneratedTable> {
        if request.start.is_empty() {
            return Err(CoreError::EmptyWaveforms);
        }
        request.validate()?;

        let params = CycleParams {
            sample_count: SAMPLES_PER_CYCLE,
            pulse_duty: request.pulse_duty,
            max_harmonics: request.max_harmonics,
            seed: request.seed,
        };

        if request.preview {
            return self.preview(request, &params);
        }

        let (samples, num_frames) = if request.morph {
            self.morphing_table(request, &params)?
        } else {
            (self.single_cycle(request, &params)?, 1)
        };

        validate_table(&samples, num_frames, SAMPLES_PER_CYCLE)?;
        debug!("generated {} frame(s) of {} samples", num_frames, SAMPLES_PER_CYCLE);

        Ok(GeneratedTable {
            samples,
            num_frames,
            samples_per_frame: SAMPLES_PER_CYCLE,
            sample_rate: SAMPLE_RATE,
            preview: false,
        })
    }

    fn single_cycle(&mut self, request: &GenerationRequest, params: &CycleParams) -> CoreResult<Vec<f64>> {
        let mut cycle = combine(&request.start, params);
        self.pipeline.apply(&mut cycle, &request.effects, 0)?;
        normalize_peak(&mut cycle);
        Ok(cycle)
    }

    fn morphing_table(
        &mut self,
        request: &GenerationRequest,
        params: &CycleParams,
    ) -> CoreResult<(Vec<f64>, usize)> {
        let end = implicit_end_frame(&request.start, request.end.as_ref());
        let num_frames = request.num_frames as usize;
        let mut table = morph(&request.start, &end, num_frames, request.curve, params)?;

        for index in 0..num_frames {
            if let Some(frame) = table.frame_mut(index) {
                self.pipeline.apply(frame, &request.effects, index as u32)?;
            }
        }
        table.normalize();
        Ok((table.into_samples(), num_frames))
    }

    fn preview(&mut self, request: &GenerationRequest, params: &CycleParams) -> CoreResult<GeneratedTable> {
        let cycle = self.single_cycle(request, params)?;
        let samples = loop_with_fades(&cycle);
        debug!("generated {} preview samples", samples.len());
        Ok(GeneratedTable {
            num_frames: 1,
            samples_per_frame: samples.len(),
            samples,
            sample_rate: SAMPLE_RATE,
            preview: true,
        })
    }
}

/// Repeats `cycle` for as many whole cycles as fit in the preview length and
/// applies linear fades at both ends.
pub fn loop_with_fades(cycle: &[f64]) -> Vec<f64> {
    if cycle.is_empty() {
        return Vec::new();
    }
    let total = (SAMPLE_RATE * PREVIEW_SECONDS) as usize;
    let repeats = total / cycle.len();
    let mut samples: Vec<f64> = cycle.iter().copied().cycle().take(repeats * cycle.len()).collect();

    let len = samples.len();
    let fade = PREVIEW_FADE_SAMPLES.min(len);
    for i in 0..fade {
        let gain = i as f64 / PREVIEW_FADE_SAMPLES as f64;
        samples[i] *= gain;
        samples[len - 1 - i] *= gain;
    }
    samples
}

/// Generates a request with a fresh [`WavetableGenerator`].
pub fn generate_wavetable(request: &GenerationRequest) -> CoreResult<GeneratedTable> {
    WavetableGenerator::default().generate(request)
}

fn percent(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

fn push_frame(tag: &mut String, frame: &WavetableFrame) {
    for (i, wave) in frame.iter().enumerate() {
        if i > 0 {
            tag.push('_');
        }
        let _ = write!(tag, "{}{}", wave.kind, percent(wave.weight));
    }
}

/// Builds a space-free file name stem describing every non-default setting.
///
/// Layout: start entries as `Name{percent}` joined by `_`, then `_to_` and
/// the explicit end entries when morphing, then `_PWM`, `_Curve`, `_Dist`,
/// filter, crush, fold, spectral and symmetry tags. An empty start frame
/// yields `"empty"`.
pub fn derive_filename_tag(request: &GenerationRequest) -> String {
    if request.start.is_empty() {
        return "empty".to_string();
    }
    let fx = &request.effects;
    let mut tag = String::new();

    push_frame(&mut tag, &request.start);
    if request.morph {
        if let Some(end) = request.end.as_ref().filter(|f| !f.is_empty()) {
            tag.push_str("_to_");
            push_frame(&mut tag, end);
        }
    }

    if (request.pulse_duty - 0.5).abs() > 0.01 {
        let _ = write!(tag, "_PWM{}", percent(request.pulse_duty));
    }
    if request.curve != MorphCurve::Linear {
        if let Some(name) = request.curve.tag() {
            let _ = write!(tag, "_Curve{}", name);
        }
    }
    if fx.distortion_amount > 0.0 && !fx.distortion.tag().is_empty() {
        let _ = write!(tag, "_Dist{}{}", fx.distortion.tag(), percent(fx.distortion_amount));
    }
    if fx.lowpass_enabled {
        let _ = write!(tag, "_LP{}", percent(fx.lowpass_cutoff));
    }
    if fx.highpass_enabled {
        let _ = write!(tag, "_HP{}", percent(fx.highpass_cutoff));
    }
    if fx.bitcrush_active() {
        let _ = write!(tag, "_BC{}", fx.bit_depth);
    }
    if fx.wavefold_enabled && fx.wavefold_amount > 0.0 {
        let _ = write!(tag, "_WF{}", percent(fx.wavefold_amount));
    }
    if fx.sample_rate_reduction_active() {
        let _ = write!(tag, "_SRR{}", fx.sample_rate_reduction);
    }
    if fx.spectral_decay_active() {
        let _ = write!(tag, "_SDecay{}", percent(fx.spectral_decay_amount));
    }
    if fx.spectral_tilt_active() {
        let _ = write!(tag, "_STilt{}", percent(fx.spectral_tilt));
    }
    if fx.spectral_gate_active() {
        let _ = write!(tag, "_SGate{}", percent(fx.spectral_gate_threshold));
    }
    if fx.spectral_shift_active() {
        let _ = write!(tag, "_SShift{}", fx.spectral_shift);
    }
    if fx.phase_randomize_active() {
        let _ = write!(tag, "_PhRand{}", percent(fx.phase_randomize_amount));
    }

    if fx.mirror_horizontal {
        tag.push_str("_MirrorH");
    }
    if fx.mirror_vertical {
        tag.push_str("_MirrorV");
    }
    if fx.invert {
        tag.push_str("_Invert");
    }
    if fx.reverse {
        tag.push_str("_Reverse");
    }
    tag
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wavecraft_spec::{DistortionKind, EffectsConfiguration, SpecError, WaveformKind};

    fn sine_request() -> GenerationRequest {
        GenerationRequest::single(WavetableFrame::single(WaveformKind::Sine, 1.0))
    }

    #[test]
    fn test_empty_start_is_rejected() {
        let request = GenerationRequest::single(WavetableFrame::default());
        assert!(matches!(
            generate_wavetable(&request),
            Err(CoreError::EmptyWaveforms)
        ));
    }

    #[test]
    fn test_single_frame_is_normalized() {
        let table = generate_wavetable(&sine_request()).unwrap();
        assert_eq!(table.num_frames, 1);
        assert_eq!(table.samples.len(), SAMPLES_PER_CYCLE);
        assert!((crate::table::peak(&table.samples) - 1.0).abs() < 1e-12);
        assert!(!table.preview);
    }

    #[test]
    fn test_zero_weights_report_silence() {
        let request = GenerationRequest::single(WavetableFrame::single(WaveformKind::Saw, 0.0));
        assert!(matches!(
            generate_wavetable(&request),
            Err(CoreError::Spec(SpecError::AllSamplesZero))
        ));
    }

    #[test]
    fn test_morph_frame_count() {
        let request =
            GenerationRequest::morphing(WavetableFrame::single(WaveformKind::Saw, 1.0), None, 8);
        let table = generate_wavetable(&request).unwrap();
        assert_eq!(table.num_frames, 8);
        assert_eq!(table.samples.len(), 8 * SAMPLES_PER_CYCLE);
        assert!(table.frame(7).is_some());
        assert!(table.frame(8).is_none());
    }

    #[test]
    fn test_preview_shape() {
        let request = GenerationRequest {
            preview: true,
            ..sine_request()
        };
        let table = generate_wavetable(&request).unwrap();
        assert!(table.preview);
        assert_eq!(table.samples.len(), 43 * SAMPLES_PER_CYCLE);
        assert_eq!(table.sample_rate, 44_100);
        assert_eq!(table.samples[0], 0.0);
        assert_eq!(*table.samples.last().unwrap(), 0.0);
    }

    #[test]
    fn test_fades_are_linear() {
        let cycle = vec![1.0; 2048];
        let samples = loop_with_fades(&cycle);
        assert_eq!(samples[1], 1.0 / 2205.0);
        assert_eq!(samples[2205], 1.0);
        assert_eq!(samples[samples.len() - 2], 1.0 / 2205.0);
    }

    #[test]
    fn test_filename_tag_basic() {
        let mut start = WavetableFrame::single(WaveformKind::Sine, 1.0);
        start.push(WaveformKind::PhaseDistortion, 0.25);
        let request = GenerationRequest::single(start);
        assert_eq!(derive_filename_tag(&request), "Sine100_PhaseDist25");
    }

    #[test]
    fn test_filename_tag_with_everything() {
        let request = GenerationRequest {
            curve: MorphCurve::SCurve,
            pulse_duty: 0.3,
            effects: EffectsConfiguration {
                distortion: DistortionKind::Soft,
                distortion_amount: 0.5,
                lowpass_enabled: true,
                lowpass_cutoff: 0.8,
                bitcrush_enabled: true,
                bit_depth: 8,
                wavefold_enabled: true,
                wavefold_amount: 0.3,
                mirror_horizontal: true,
                reverse: true,
                ..Default::default()
            },
            ..GenerationRequest::morphing(
                WavetableFrame::single(WaveformKind::Saw, 1.0),
                Some(WavetableFrame::single(WaveformKind::Square, 0.5)),
                16,
            )
        };
        assert_eq!(
            derive_filename_tag(&request),
            "Saw100_to_Square50_PWM30_CurveS_DistSoft50_LP80_BC8_WF30_MirrorH_Reverse"
        );
    }

    #[test]
    fn test_filename_tag_ignores_end_without_morph() {
        let mut request = sine_request();
        request.end = Some(WavetableFrame::single(WaveformKind::Saw, 1.0));
        assert_eq!(derive_filename_tag(&request), "Sine100");
        assert_eq!(
            derive_filename_tag(&GenerationRequest::single(WavetableFrame::default())),
            "empty"
        );
    }

    #[test]
    fn test_filename_tag_spectral() {
        let request = GenerationRequest {
            effects: EffectsConfiguration {
                sample_rate_reduction: 4,
                spectral_tilt_enabled: true,
                spectral_tilt: -0.5,
                spectral_shift: 3,
                ..Default::default()
            },
            ..sine_request()
        };
        assert_eq!(derive_filename_tag(&request), "Sine100_SRR4_STilt-50_SShift3");
    }
}
