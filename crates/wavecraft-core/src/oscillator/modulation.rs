//! Ring, amplitude, frequency and phase modulation.

use std::f64::consts::TAU;

use super::partial;

/// Carrier times an inharmonic modulator at 3.7x.
pub(super) fn ring(t: f64) -> f64 {
    partial(1.0, t) * partial(3.7, t)
}

pub(super) fn amplitude(t: f64) -> f64 {
    partial(1.0, t) * (0.5 + 0.5 * partial(0.3, t))
}

/// Deep FM, index 2 at a 2.5 ratio.
pub(super) fn frequency(t: f64) -> f64 {
    (TAU * t + 2.0 * partial(2.5, t)).sin()
}

/// Two operators modulating each other at index 0.5.
pub(super) fn cross(t: f64) -> f64 {
    let a = (TAU * t + 0.5 * partial(1.5, t)).sin();
    let b = (TAU * 1.5 * t + 0.5 * partial(1.0, t)).sin();
    (a + b) * 0.5
}

pub(super) fn phase(t: f64) -> f64 {
    (TAU * t + 1.5 * partial(3.0, t)).sin()
}
