//! Stretched, metallic and plucked partials.

use rand::Rng;

use super::partial;
use crate::rng::{create_rng, derive_component_seed};

/// Series whose k-th partial sits at `k^exponent`, weighted `1/k`.
pub(super) fn warped(t: f64, h: u32, exponent: f64) -> f64 {
    (1..=h)
        .map(|k| partial((k as f64).powf(exponent), t) / k as f64)
        .sum()
}

pub(super) fn metallic(t: f64) -> f64 {
    (partial(1.0, t) + 0.5 * partial(2.76, t) + 0.3 * partial(5.40, t) + 0.2 * partial(8.93, t))
        / 2.0
}

pub(super) fn clangorous(t: f64) -> f64 {
    (partial(1.0, t)
        + 0.6 * partial(1.593, t)
        + 0.4 * partial(2.136, t)
        + 0.3 * partial(2.653, t)
        + 0.2 * partial(3.593, t))
        / 2.5
}

/// Piano-like stiffness, `f_k = k sqrt(1 + B k^2)` with B = 1e-4.
pub(super) fn stiff_string(t: f64, h: u32) -> f64 {
    const B: f64 = 0.0001;
    (1..=h)
        .map(|k| {
            let k = k as f64;
            partial(k * (1.0 + B * k * k).sqrt(), t) / k
        })
        .sum()
}

const DELAY_LENGTH: usize = 50;
const DAMPING: f64 = 0.996;

/// Karplus-Strong pluck over one cycle.
///
/// The delay line is owned by this call and filled with seeded noise before
/// the first sample, so repeated calls with the same seed agree.
pub(super) fn karplus_strong(n: usize, seed: u32) -> Vec<f64> {
    let mut rng = create_rng(derive_component_seed(seed, "karplus_strong"));
    let mut delay: Vec<f64> = (0..DELAY_LENGTH)
        .map(|_| rng.gen_range(-1.0..=1.0))
        .collect();

    (0..n)
        .map(|i| {
            let idx = i % DELAY_LENGTH;
            let out = delay[idx];
            delay[idx] = (out + delay[(i + 1) % DELAY_LENGTH]) * 0.5 * DAMPING;
            out
        })
        .collect()
}
