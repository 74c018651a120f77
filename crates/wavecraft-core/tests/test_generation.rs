//! End-to-end generation tests.

use pretty_assertions::assert_eq;
use wavecraft_core::combiner::combine;
use wavecraft_core::table::{normalize_peak, peak};
use wavecraft_core::{
    analyze_by_correlation, derive_filename_tag, generate_wavetable, implicit_end_frame,
    CycleParams, WavetableGenerator,
};
use wavecraft_spec::{
    DistortionKind, EffectsConfiguration, GenerationRequest, MorphCurve, WaveformKind,
    WavetableFrame, WeightedWaveform, SAMPLES_PER_CYCLE,
};

fn assert_close(a: &[f64], b: &[f64], tolerance: f64) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!((x - y).abs() < tolerance, "sample {}: {} vs {}", i, x, y);
    }
}

#[test]
fn test_square_crosses_zero_at_half_cycle() {
    let request = GenerationRequest::single(WavetableFrame::single(WaveformKind::Square, 1.0));
    let table = generate_wavetable(&request).unwrap();
    let samples = &table.samples;

    assert!((peak(samples) - 1.0).abs() < 1e-12);
    assert!(samples[0].abs() < 1e-6);
    assert!(samples[1024].abs() < 1e-6);
    assert!(samples[8..1016].iter().all(|&s| s > 0.9));
    assert!(samples[1032..2040].iter().all(|&s| s < -0.9));
}

#[test]
fn test_default_morph_targets_additive() {
    let start = WavetableFrame::single(WaveformKind::Sine, 1.0);
    let end = implicit_end_frame(&start, None);
    assert_eq!(
        end,
        WavetableFrame::new(vec![
            WeightedWaveform::new(WaveformKind::Sine, 1.0),
            WeightedWaveform::new(WaveformKind::Additive, 0.5),
        ])
    );

    let request = GenerationRequest::morphing(start, None, 4);
    let table = generate_wavetable(&request).unwrap();
    assert_eq!(table.num_frames, 4);
    assert!((peak(&table.samples) - 1.0).abs() < 1e-12);
}

#[test]
fn test_morph_endpoints_match_combined_frames() {
    let start = WavetableFrame::single(WaveformKind::Triangle, 1.0);
    let end = WavetableFrame::single(WaveformKind::Bell, 0.6);
    for curve in [
        MorphCurve::Linear,
        MorphCurve::Exponential,
        MorphCurve::Logarithmic,
        MorphCurve::SCurve,
    ] {
        let request = GenerationRequest {
            curve,
            ..GenerationRequest::morphing(start.clone(), Some(end.clone()), 6)
        };
        let table = generate_wavetable(&request).unwrap();

        let params = CycleParams::default();
        let mut first = table.frame(0).unwrap().to_vec();
        let mut last = table.frame(5).unwrap().to_vec();
        normalize_peak(&mut first);
        normalize_peak(&mut last);

        let mut expected_first = combine(&start, &params);
        let mut expected_last = combine(&end, &params);
        normalize_peak(&mut expected_first);
        normalize_peak(&mut expected_last);

        assert_close(&first, &expected_first, 1e-9);
        assert_close(&last, &expected_last, 1e-9);
    }
}

#[test]
fn test_morph_keeps_relative_loudness() {
    let request = GenerationRequest::morphing(
        WavetableFrame::single(WaveformKind::Sine, 0.1),
        Some(WavetableFrame::single(WaveformKind::Sine, 1.0)),
        8,
    );
    let table = generate_wavetable(&request).unwrap();
    let first = peak(table.frame(0).unwrap());
    let last = peak(table.frame(7).unwrap());
    assert!((last - 1.0).abs() < 1e-12);
    assert!((first - 0.1).abs() < 1e-9);
}

#[test]
fn test_effects_run_per_frame_and_renormalize() {
    let request = GenerationRequest {
        effects: EffectsConfiguration {
            distortion: DistortionKind::Soft,
            distortion_amount: 0.8,
            lowpass_enabled: true,
            lowpass_cutoff: 0.5,
            spectral_shift: 2,
            ..Default::default()
        },
        ..GenerationRequest::morphing(WavetableFrame::single(WaveformKind::Saw, 1.0), None, 4)
    };
    let table = generate_wavetable(&request).unwrap();
    assert_eq!(table.samples.len(), 4 * SAMPLES_PER_CYCLE);
    assert!((peak(&table.samples) - 1.0).abs() < 1e-12);
    assert!(table.samples.iter().all(|s| s.is_finite()));
}

#[test]
fn test_generation_is_deterministic() {
    let request = GenerationRequest {
        seed: 7,
        effects: EffectsConfiguration {
            phase_randomize_enabled: true,
            phase_randomize_amount: 0.7,
            seed: 3,
            ..Default::default()
        },
        ..GenerationRequest::morphing(
            WavetableFrame::single(WaveformKind::KarplusStrong, 1.0),
            Some(WavetableFrame::single(WaveformKind::Metallic, 1.0)),
            4,
        )
    };
    let mut generator = WavetableGenerator::default();
    let a = generator.generate(&request).unwrap();
    let b = generator.generate(&request).unwrap();
    let c = generate_wavetable(&request).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn test_generated_sine_matches_back_to_sine() {
    let table =
        generate_wavetable(&GenerationRequest::single(WavetableFrame::single(WaveformKind::Sine, 1.0)))
            .unwrap();
    let frame = analyze_by_correlation(&table.samples);
    assert_eq!(frame.waves[0].kind, WaveformKind::Sine);
    assert!(frame.waves[0].weight >= 0.9);
}

#[test]
fn test_filename_tags_are_space_free() {
    let mut start = WavetableFrame::default();
    for kind in WaveformKind::ALL.iter().take(10) {
        start.push(*kind, 0.333);
    }
    let request = GenerationRequest {
        curve: MorphCurve::Logarithmic,
        ..GenerationRequest::morphing(start, None, 16)
    };
    let tag = derive_filename_tag(&request);
    assert!(!tag.contains(' '));
    assert!(tag.starts_with("Sine33_Square33"));
    assert!(tag.ends_with("_CurveLog"));
}
