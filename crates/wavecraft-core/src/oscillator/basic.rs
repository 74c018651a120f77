//! Band-limited classic shapes.

use std::f64::consts::TAU;

/// PolyBLEP residual for a unit step at phase 0.
///
/// `t` is the phase in [0, 1) and `dt` the phase increment per sample. The
/// correction is non-zero only within one sample of the discontinuity.
#[inline]
pub fn poly_blep(t: f64, dt: f64) -> f64 {
    if t < dt {
        let t = t / dt;
        t + t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + t + t + 1.0
    } else {
        0.0
    }
}

#[inline]
pub(super) fn wrap(t: f64) -> f64 {
    t.rem_euclid(1.0)
}

pub(super) fn sine(t: f64) -> f64 {
    (TAU * t).sin()
}

/// Rising saw with its reset smoothed at phase 0.
pub(super) fn saw(t: f64, dt: f64) -> f64 {
    2.0 * t - 1.0 - poly_blep(t, dt)
}

pub(super) fn reverse_saw(t: f64, dt: f64) -> f64 {
    1.0 - 2.0 * t + poly_blep(t, dt)
}

pub(super) fn square(t: f64, dt: f64) -> f64 {
    pulse(t, dt, 0.5)
}

/// Rectangle wave high for the first `duty` of the cycle.
pub(super) fn pulse(t: f64, dt: f64, duty: f64) -> f64 {
    let naive = if t < duty { 1.0 } else { -1.0 };
    naive + poly_blep(t, dt) - poly_blep(wrap(t - duty), dt)
}

pub(super) fn triangle(t: f64, dt: f64) -> f64 {
    let naive = 1.0 - 4.0 * (t - 0.5).abs();
    naive + dt * poly_blep(t, dt) - dt * poly_blep(wrap(t + 0.5), dt)
}
