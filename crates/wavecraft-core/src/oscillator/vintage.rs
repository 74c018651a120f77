//! Vintage analog emulations built from detuned saws and colored sines.

use super::basic::{poly_blep, pulse, saw, wrap};
use super::partial;

/// Naive saw at `ratio` times the fundamental.
fn detuned(t: f64, ratio: f64) -> f64 {
    2.0 * wrap(t * ratio) - 1.0
}

pub(super) fn arp_odyssey(t: f64, dt: f64) -> f64 {
    let saw = 2.0 * t - 1.0;
    let tri = 1.0 - 4.0 * (t - 0.5).abs();
    saw * 0.7 + tri * 0.3 + 0.15 * partial(3.0, t) - poly_blep(t, dt)
}

/// Four slightly detuned saws with a slow wobble on the last one.
pub(super) fn cs80(t: f64, dt: f64) -> f64 {
    let lfo = partial(0.3, t) * 0.002;
    let blend = (detuned(t, 1.0)
        + detuned(t, 1.003)
        + detuned(t, 0.997)
        + detuned(t, 1.001) * (1.0 + lfo))
        / 4.0;
    blend * 0.85 + 0.15 * partial(1.0, t) - poly_blep(t, dt)
}

pub(super) fn juno(t: f64, dt: f64) -> f64 {
    let lfo = partial(0.5, t) * 0.003;
    let chorus = detuned(t, 1.0 + lfo);
    detuned(t, 1.0) * 0.5 + detuned(t, 1.005) * 0.3 + chorus * 0.2 - poly_blep(t, dt)
}

pub(super) fn minimoog(t: f64, dt: f64) -> f64 {
    (detuned(t, 1.0) + detuned(t, 1.002) * 0.7 + detuned(t, 0.998) * 0.7) / 2.4 - poly_blep(t, dt)
}

pub(super) fn ms20(t: f64, dt: f64) -> f64 {
    ((saw(t, dt) + 0.4 * partial(5.0, t)) * 1.5).tanh()
}

pub(super) fn oberheim(t: f64, dt: f64) -> f64 {
    saw(t, dt) * 0.6 + pulse(t, dt, 0.5) * 0.4
}

/// 64-step quantized blend of sine and ramp.
pub(super) fn ppg(t: f64) -> f64 {
    const STEPS: u32 = 64;
    let step = (t * STEPS as f64) as u32 % STEPS;
    let phase = step as f64 / STEPS as f64;
    partial(1.0, phase) * 0.7 + (2.0 * phase - 1.0) * 0.3
}

pub(super) fn prophet5(t: f64, dt: f64) -> f64 {
    saw(t, dt) * 0.8 + 0.2 * partial(2.0, t)
}

pub(super) fn tb303(t: f64, dt: f64) -> f64 {
    ((saw(t, dt) + 0.3 * partial(4.0, t)) * 1.2).tanh()
}
