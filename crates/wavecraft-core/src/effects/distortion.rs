//! Nonlinear shapers: distortion, wavefolding, bit crushing and
//! sample-and-hold. All of them expect to run inside the oversampling wrapper.

use wavecraft_spec::DistortionKind;

/// Applies the selected distortion curve.
pub fn apply_distortion(samples: &mut [f64], kind: DistortionKind, amount: f64) {
    match kind {
        DistortionKind::None => {}
        DistortionKind::Soft => {
            let drive = 1.0 + amount * 9.0;
            for s in samples.iter_mut() {
                *s = (*s * drive).tanh();
            }
        }
        DistortionKind::Hard => {
            let threshold = 1.0 - amount * 0.9;
            for s in samples.iter_mut() {
                *s = s.clamp(-threshold, threshold);
            }
        }
        DistortionKind::Asymmetric => {
            let drive = 1.0 + amount * 4.0;
            for s in samples.iter_mut() {
                *s = if *s > 0.0 {
                    (*s * drive).tanh()
                } else {
                    (*s * drive * 0.5).tanh()
                };
            }
        }
    }
}

/// Reflects `x` back into [-1, 1] until it fits.
fn fold(mut x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    while !(-1.0..=1.0).contains(&x) {
        if x > 1.0 {
            x = 2.0 - x;
        }
        if x < -1.0 {
            x = -2.0 - x;
        }
    }
    x
}

/// Triangle wavefolder with gain 1x-4x.
pub fn apply_wavefold(samples: &mut [f64], amount: f64) {
    let gain = 1.0 + amount * 3.0;
    for s in samples.iter_mut() {
        *s = fold(*s * gain);
    }
}

/// Quantizes a sample to a specific step.
fn quantize(sample: f64, step: f64) -> f64 {
    (sample / step).round() * step
}

/// Reduces resolution to `2^bits` levels over [-1, 1].
pub fn apply_bitcrush(samples: &mut [f64], bits: u32) {
    let bits = bits.clamp(1, 16);
    let levels = (1_u32 << bits) as f64;
    let step = 2.0 / levels;
    for s in samples.iter_mut() {
        *s = quantize(*s, step);
    }
}

/// Holds every `hold`-th sample for the following `hold - 1` samples.
pub fn apply_sample_hold(samples: &mut [f64], hold: usize) {
    if hold <= 1 {
        return;
    }
    for chunk in samples.chunks_mut(hold) {
        let held = chunk[0];
        chunk.iter_mut().for_each(|s| *s = held);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hard_clip_threshold() {
        let mut samples = vec![-1.0, -0.05, 0.5, 1.0];
        apply_distortion(&mut samples, DistortionKind::Hard, 1.0);
        for (s, expected) in samples.iter().zip([-0.1, -0.05, 0.1, 0.1]) {
            assert!((s - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_soft_distortion_saturates() {
        let mut samples = vec![0.5, -0.5];
        apply_distortion(&mut samples, DistortionKind::Soft, 1.0);
        assert!((samples[0] - 5.0_f64.tanh()).abs() < 1e-12);
        assert!((samples[1] + 5.0_f64.tanh()).abs() < 1e-12);
    }

    #[test]
    fn test_asymmetric_halves_negative_drive() {
        let mut samples = vec![0.2, -0.2];
        apply_distortion(&mut samples, DistortionKind::Asymmetric, 1.0);
        assert!((samples[0] - 1.0_f64.tanh()).abs() < 1e-12);
        assert!((samples[1] + 0.5_f64.tanh()).abs() < 1e-12);
    }

    #[test]
    fn test_none_is_identity() {
        let mut samples = vec![0.3, -2.0];
        apply_distortion(&mut samples, DistortionKind::None, 1.0);
        assert_eq!(samples, vec![0.3, -2.0]);
    }

    #[test]
    fn test_fold_reflects() {
        assert_eq!(fold(1.5), 0.5);
        assert_eq!(fold(-1.25), -0.75);
        assert_eq!(fold(3.5), -0.5);
        assert_eq!(fold(0.25), 0.25);
    }

    #[test]
    fn test_wavefold_stays_in_range() {
        let mut samples: Vec<f64> = (0..100).map(|i| (i as f64 - 50.0) / 50.0).collect();
        apply_wavefold(&mut samples, 1.0);
        assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn test_bitcrush_one_bit() {
        let mut samples = vec![0.9, 0.4, -0.4, -0.9];
        apply_bitcrush(&mut samples, 1);
        assert_eq!(samples, vec![1.0, 0.0, -0.0, -1.0]);
    }

    #[test]
    fn test_sample_hold() {
        let mut samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        apply_sample_hold(&mut samples, 2);
        assert_eq!(samples, vec![1.0, 1.0, 3.0, 3.0, 5.0]);

        let mut untouched = vec![1.0, 2.0];
        apply_sample_hold(&mut untouched, 1);
        assert_eq!(untouched, vec![1.0, 2.0]);
    }
}
