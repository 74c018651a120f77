//! Integer harmonic series.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::partial;

/// Odd harmonics 1, 3, 5, ... up to `2h - 1`, weighted `1/k`.
pub(super) fn odd(t: f64, h: u32) -> f64 {
    (1..=2 * h)
        .step_by(2)
        .map(|k| partial(k as f64, t) / k as f64)
        .sum()
}

/// Even harmonics 2, 4, ... up to `h`, weighted `1/k`.
pub(super) fn even(t: f64, h: u32) -> f64 {
    (2..=h)
        .step_by(2)
        .map(|k| partial(k as f64, t) / k as f64)
        .sum()
}

/// Full series 1..=h, weighted `1/k`.
pub(super) fn series(t: f64, h: u32) -> f64 {
    (1..=h).map(|k| partial(k as f64, t) / k as f64).sum()
}

pub(super) fn sub_harmonics(t: f64) -> f64 {
    let w = TAU * t;
    w.sin() + 0.5 * (w + FRAC_PI_2).sin() + 0.25 * (w + PI).sin()
}

pub(super) fn formant(t: f64) -> f64 {
    partial(2.0, t) + 0.7 * partial(3.0, t)
}
