//! 4x oversampling wrapper for nonlinear stages.

use std::f64::consts::PI;

/// Oversampling factor.
pub const FACTOR: usize = 4;

const KERNEL_TAPS: i64 = 16;
const SMOOTHING_PASSES: usize = 4;
const SMOOTHING_WINDOW: usize = 8;

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

fn lanczos(x: f64) -> f64 {
    sinc(x) * sinc(x / FACTOR as f64)
}

/// Zero-stuffs `input` to four times its length and interpolates with a
/// 16-tap Lanczos kernel.
///
/// The kernel is 1 at the origin and 0 at every other multiple of four, so
/// original samples pass through unchanged at indices `4 * i`.
pub fn upsample(input: &[f64]) -> Vec<f64> {
    let len = input.len() * FACTOR;
    let mut stuffed = vec![0.0; len];
    for (i, &sample) in input.iter().enumerate() {
        stuffed[i * FACTOR] = sample;
    }

    let half = KERNEL_TAPS / 2;
    (0..len as i64)
        .map(|i| {
            (-half..half)
                .filter_map(|j| {
                    let idx = i + j;
                    if idx < 0 || idx >= len as i64 {
                        return None;
                    }
                    Some(stuffed[idx as usize] * lanczos(j as f64 / FACTOR as f64))
                })
                .sum()
        })
        .collect()
}

/// Four passes of an 8-sample moving average over the interior.
fn smooth(samples: &mut [f64]) {
    let half = SMOOTHING_WINDOW / 2;
    let end = samples.len().saturating_sub(SMOOTHING_WINDOW);
    for _ in 0..SMOOTHING_PASSES {
        let source = samples.to_vec();
        for i in SMOOTHING_WINDOW..end {
            let sum: f64 = source[i - half..i + half].iter().sum();
            samples[i] = sum / SMOOTHING_WINDOW as f64;
        }
    }
}

/// Low-pass filters and keeps every fourth sample.
pub fn downsample(input: &[f64]) -> Vec<f64> {
    let mut filtered = input.to_vec();
    smooth(&mut filtered);
    filtered.iter().step_by(FACTOR).take(input.len() / FACTOR).copied().collect()
}

/// Runs `process` on a 4x oversampled copy of `samples` and writes the
/// decimated result back. The slice length never changes.
pub fn with_oversampling(samples: &mut [f64], process: impl FnOnce(&mut [f64])) {
    if samples.is_empty() {
        return;
    }
    let mut oversampled = upsample(samples);
    process(&mut oversampled);
    let decimated = downsample(&oversampled);
    samples.copy_from_slice(&decimated);
}
