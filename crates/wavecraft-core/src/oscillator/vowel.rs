//! Vowel formant approximations.
//!
//! Formant frequencies are expressed relative to middle C (261.63 Hz) so a
//! cycle played at C4 lands its formants near their natural positions.

use super::partial;

const MIDDLE_C: f64 = 261.63;

/// Three formants with their amplitudes and an output divisor.
pub(super) struct Vowel {
    formants: [(f64, f64); 3],
    divisor: f64,
}

pub(super) const A: Vowel = Vowel {
    formants: [(730.0, 1.0), (1090.0, 0.7), (2440.0, 0.3)],
    divisor: 2.0,
};
pub(super) const E: Vowel = Vowel {
    formants: [(530.0, 1.0), (1840.0, 0.8), (2480.0, 0.3)],
    divisor: 2.1,
};
pub(super) const I: Vowel = Vowel {
    formants: [(270.0, 1.0), (2290.0, 0.9), (3010.0, 0.4)],
    divisor: 2.3,
};
pub(super) const O: Vowel = Vowel {
    formants: [(570.0, 1.0), (840.0, 0.7), (2410.0, 0.2)],
    divisor: 1.9,
};
pub(super) const U: Vowel = Vowel {
    formants: [(300.0, 1.0), (870.0, 0.6), (2240.0, 0.2)],
    divisor: 1.8,
};

pub(super) fn formant(t: f64, vowel: &Vowel) -> f64 {
    let sum: f64 = vowel
        .formants
        .iter()
        .map(|&(freq, amp)| partial(freq / MIDDLE_C, t) * amp)
        .sum();
    sum / vowel.divisor
}

/// Glide from "A" towards "I" over the first quarter of a slow sine.
pub(super) fn diphthong(t: f64) -> f64 {
    let morph = partial(0.25, t) * 0.5 + 0.5;
    let f1 = 730.0 + (270.0 - 730.0) * morph;
    let f2 = 1090.0 + (2290.0 - 1090.0) * morph;
    (partial(f1 / MIDDLE_C, t) + partial(f2 / MIDDLE_C, t) * 0.8) / 1.8
}
