//! FM, phase distortion, folding and waveshaping.

use std::f64::consts::TAU;

use super::basic::saw;
use super::partial;

pub(super) fn simple_fm(t: f64) -> f64 {
    (TAU * t + 0.3 * partial(2.0, t)).sin()
}

pub(super) fn complex_fm(t: f64) -> f64 {
    (TAU * t + 0.2 * partial(2.0, t) + 0.15 * partial(3.0, t)).sin()
}

pub(super) fn phase_distortion(t: f64) -> f64 {
    (TAU * (t + 0.08 * (TAU * t).sin())).sin()
}

/// Sine at 1.3x gain folded back once at the rails.
pub(super) fn wavefold(t: f64) -> f64 {
    let x = (TAU * t).sin() * 1.3;
    if x > 1.0 {
        2.0 - x
    } else if x < -1.0 {
        -2.0 - x
    } else {
        x
    }
}

pub(super) fn hard_sync(t: f64, dt: f64) -> f64 {
    saw(t, dt) + 0.4 * partial(2.0, t) + 0.2 * partial(3.0, t)
}

/// Third Chebyshev polynomial of a sine, which is its third harmonic.
pub(super) fn chebyshev(t: f64) -> f64 {
    let x = (TAU * t).sin();
    4.0 * x * x * x - 3.0 * x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chebyshev_is_third_harmonic() {
        for i in 0..16 {
            let t = i as f64 / 16.0;
            assert!((chebyshev(t) + partial(3.0, t)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wavefold_stays_in_range() {
        for i in 0..64 {
            assert!(wavefold(i as f64 / 64.0).abs() <= 1.0);
        }
    }
}
