//! Physical instrument approximations.

use super::partial;

/// Plucked string spectrum, `1/k^2` rolloff.
pub(super) fn string(t: f64, h: u32) -> f64 {
    (1..=h)
        .map(|k| partial(k as f64, t) / (k as f64 * k as f64))
        .sum()
}

/// Odd partials up to `h`, weighted `1/(0.8k)`.
pub(super) fn brass(t: f64, h: u32) -> f64 {
    (1..=h)
        .step_by(2)
        .map(|k| partial(k as f64, t) / (k as f64 * 0.8))
        .sum()
}

pub(super) fn reed(t: f64) -> f64 {
    partial(1.0, t) + 0.3 * partial(3.0, t)
}

pub(super) fn vocal(t: f64) -> f64 {
    partial(2.0, t) + 0.6 * partial(3.0, t)
}

pub(super) fn bell(t: f64) -> f64 {
    partial(1.0, t) + 0.5 * partial(2.0, t) + 0.35 * partial(3.0, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brass_uses_odd_partials_only() {
        let t = 0.17;
        let expected = partial(1.0, t) / 0.8 + partial(3.0, t) / 2.4;
        assert!((brass(t, 4) - expected).abs() < 1e-12);
    }
}
