//! Modern and mathematical shapes.

use std::f64::consts::{E, PI, TAU};

use super::basic::{poly_blep, saw, wrap};
use super::partial;

pub(super) fn supersaw(t: f64, dt: f64) -> f64 {
    saw(t, dt) + 0.2 * partial(2.0, t) + 0.1 * partial(3.0, t)
}

pub(super) fn parabolic(t: f64) -> f64 {
    1.0 - 4.0 * (t - 0.5) * (t - 0.5)
}

pub(super) fn double_sine(t: f64) -> f64 {
    (TAU * t).sin() * (TAU * t).cos()
}

pub(super) fn half_sine(t: f64) -> f64 {
    (TAU * t).sin().abs() * 2.0 - 1.0
}

/// Trapezoid with 20% ramps and smoothed corners.
pub(super) fn trapezoid(t: f64, dt: f64) -> f64 {
    const SLOPE: f64 = 0.2;
    let naive = if t < SLOPE {
        t / SLOPE * 2.0 - 1.0
    } else if t < 0.5 {
        1.0
    } else if t < 0.5 + SLOPE {
        1.0 - (t - 0.5) / SLOPE * 2.0
    } else {
        -1.0
    };
    naive + dt * poly_blep(t, dt) - dt * poly_blep(wrap(t - SLOPE), dt)
        - dt * poly_blep(wrap(t - 0.5), dt)
        + dt * poly_blep(wrap(t - 0.5 - SLOPE), dt)
}

/// Rising then falling `x^1.5` ramps, one per half cycle.
pub(super) fn power(t: f64) -> f64 {
    rise_fall(t, |x| x.powf(1.5))
}

pub(super) fn exponential(t: f64) -> f64 {
    rise_fall(t, |x| (x.exp() - 1.0) / (E - 1.0))
}

pub(super) fn logistic(t: f64) -> f64 {
    rise_fall(t, |x| 1.0 / (1.0 + (-(x * 12.0 - 6.0)).exp()))
}

/// Maps a unit ramp shape onto [-1, 1], rising in the first half of the
/// cycle and falling in the second.
fn rise_fall(t: f64, shape: impl Fn(f64) -> f64) -> f64 {
    let phase = t * 2.0;
    if phase < 1.0 {
        shape(phase) * 2.0 - 1.0
    } else {
        1.0 - shape(phase - 1.0) * 2.0
    }
}

/// Eight-step staircase.
pub(super) fn stepped(t: f64) -> f64 {
    let step = (t * 8.0) as u32 % 8;
    step as f64 / 3.5 - 1.0
}

/// Harmonic series with fixed pseudo-random phase offsets per partial.
pub(super) fn noise(t: f64, h: u32) -> f64 {
    (1..=h)
        .map(|k| {
            let offset = (k.wrapping_mul(123_456_789) % 1000) as f64 / 1000.0;
            (TAU * k as f64 * t + offset * TAU).sin() / k as f64
        })
        .sum()
}

pub(super) fn procedural(t: f64) -> f64 {
    (3.0 * (TAU * t).sin()).tanh()
}

/// `sin(x)/x` over eight lobes each side of the cycle center.
pub(super) fn sinc(t: f64) -> f64 {
    let x = (t - 0.5) * 16.0 * PI;
    if x.abs() < 0.001 {
        1.0
    } else {
        x.sin() / x
    }
}
