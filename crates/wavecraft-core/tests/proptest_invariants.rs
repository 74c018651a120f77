//! Property-based tests for the synthesis invariants.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wavecraft-core --test proptest_invariants
//! ```

use proptest::prelude::*;

use wavecraft_core::effects::EffectsPipeline;
use wavecraft_core::oscillator::{generate, CycleParams};
use wavecraft_core::spectral::{shift_bins, SpectralEffects};
use wavecraft_core::table::peak;
use wavecraft_core::{combine, morph};
use wavecraft_spec::{
    DistortionKind, EffectsConfiguration, MorphCurve, WaveformKind, WavetableFrame,
    WeightedWaveform,
};

fn any_kind() -> impl Strategy<Value = WaveformKind> {
    prop::sample::select(WaveformKind::ALL.to_vec())
}

fn any_frame() -> impl Strategy<Value = WavetableFrame> {
    prop::collection::vec((any_kind(), 0.05f64..1.0), 1..4)
        .prop_map(|waves| {
            waves
                .into_iter()
                .map(|(kind, weight)| WeightedWaveform::new(kind, weight))
                .collect::<WavetableFrame>()
        })
}

fn any_curve() -> impl Strategy<Value = MorphCurve> {
    prop::sample::select(vec![
        MorphCurve::Linear,
        MorphCurve::Exponential,
        MorphCurve::Logarithmic,
        MorphCurve::SCurve,
    ])
}

fn any_distortion() -> impl Strategy<Value = DistortionKind> {
    prop::sample::select(vec![
        DistortionKind::None,
        DistortionKind::Soft,
        DistortionKind::Hard,
        DistortionKind::Asymmetric,
    ])
}

fn sine(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (std::f64::consts::TAU * 3.0 * i as f64 / n as f64).sin())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every kind is DC-free at any cycle length.
    #[test]
    fn cycles_have_zero_mean(kind in any_kind(), len in 16usize..4096) {
        let cycle = generate(kind, &CycleParams::with_sample_count(len));
        prop_assert_eq!(cycle.len(), len);
        let mean = cycle.iter().sum::<f64>() / len as f64;
        prop_assert!(mean.abs() < 1e-9, "{} mean {}", kind, mean);
    }

    /// Morphs peak at exactly 1.0 and no frame exceeds it.
    #[test]
    fn morphs_are_globally_normalized(
        start in any_frame(),
        end in any_frame(),
        frames in 1usize..6,
        curve in any_curve(),
    ) {
        let params = CycleParams::default();
        prop_assume!(peak(&combine(&start, &params)) > 1e-6);
        let table = morph(&start, &end, frames, curve, &params).unwrap();
        prop_assert_eq!(table.num_frames(), frames);
        prop_assert!((table.peak() - 1.0).abs() < 1e-9);
        for frame in table.frames() {
            prop_assert!(peak(frame) <= 1.0 + 1e-12);
        }
    }

    /// The oversampled shapers never change the block length.
    #[test]
    fn nonlinear_effects_preserve_length(
        len in 1usize..3000,
        distortion in any_distortion(),
        amount in 0.0f64..1.0,
        bit_depth in 1u32..17,
        reduction in 0u32..8,
        wavefold in any::<bool>(),
    ) {
        let fx = EffectsConfiguration {
            distortion,
            distortion_amount: amount,
            wavefold_enabled: wavefold,
            wavefold_amount: amount,
            bitcrush_enabled: true,
            bit_depth,
            sample_rate_reduction: reduction,
            ..Default::default()
        };
        let mut samples = sine(len);
        EffectsPipeline::default().apply(&mut samples, &fx, 0).unwrap();
        prop_assert_eq!(samples.len(), len);
        prop_assert!(samples.iter().all(|s| s.is_finite()));
    }

    /// A zero bin shift is an identity round trip at any length.
    #[test]
    fn zero_shift_is_identity(len in 1usize..3000) {
        let original: Vec<f64> = sine(len).iter().map(|s| s * 0.8).collect();
        let mut samples = original.clone();
        SpectralEffects::default()
            .process(&mut samples, |bins| shift_bins(bins, 0))
            .unwrap();
        for (a, b) in original.iter().zip(&samples) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }
}
