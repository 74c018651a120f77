//! Fractal constructions.

use std::f64::consts::PI;

/// Weierstrass sum `sum a^k cos(b^k pi t)` with a = 0.5, b = 7, eight terms.
pub(super) fn weierstrass(t: f64) -> f64 {
    let mut value = 0.0;
    let mut amp = 1.0;
    let mut freq = 1.0;
    for _ in 0..8 {
        value += amp * (freq * PI * t).cos();
        amp *= 0.5;
        freq *= 7.0;
    }
    value
}

/// Devil's staircase, six ternary digits deep.
pub(super) fn cantor(t: f64) -> f64 {
    let mut value = 0.0;
    let mut power = 1.0;
    for _ in 0..6 {
        let segment = (t * power) % 1.0;
        if segment > 0.666 {
            value += 1.0 / power;
        } else if segment >= 0.333 {
            value += 0.5 / power;
        }
        power *= 3.0;
    }
    (value - 0.5) * 2.0
}

/// Five octaves of a folded ramp, each a quarter the period of the last.
pub(super) fn koch(t: f64) -> f64 {
    let mut value = 0.0;
    let mut freq = 1.0;
    for _ in 0..5 {
        let phase = (t * freq) % 1.0;
        let shape = if phase < 0.25 {
            phase * 4.0
        } else if phase < 0.5 {
            2.0 - phase * 4.0
        } else if phase < 0.75 {
            (phase - 0.5) * 4.0
        } else {
            1.0 - (phase - 0.75) * 4.0
        };
        value += shape / freq;
        freq *= 4.0;
    }
    (value - 0.5) * 2.0
}

/// Escape count along a horizontal line crossing the set boundary.
pub(super) fn mandelbrot(t: f64) -> f64 {
    const MAX_ITERATIONS: u32 = 20;
    let c_re = -0.7 + t * 0.6;
    let c_im = 0.7;

    let (mut z_re, mut z_im) = (0.0f64, 0.0f64);
    let mut iteration = 0;
    while iteration < MAX_ITERATIONS && z_re * z_re + z_im * z_im < 4.0 {
        let next_re = z_re * z_re - z_im * z_im + c_re;
        z_im = 2.0 * z_re * z_im + c_im;
        z_re = next_re;
        iteration += 1;
    }
    (iteration as f64 / MAX_ITERATIONS as f64 - 0.5) * 2.0
}
