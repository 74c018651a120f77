//! Sample-order and polarity operations.

/// Plays the cycle backwards.
pub fn reverse(samples: &mut [f64]) {
    samples.reverse();
}

/// Overwrites the second half with the first half played backwards.
pub fn mirror_horizontal(samples: &mut [f64]) {
    let half = samples.len() / 2;
    for i in 0..half {
        samples[half + i] = samples[half - i - 1];
    }
}

/// Negates every sample.
pub fn negate(samples: &mut [f64]) {
    for s in samples.iter_mut() {
        *s = -*s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mirror_horizontal() {
        let mut samples = vec![1.0, 2.0, 3.0, 4.0];
        mirror_horizontal(&mut samples);
        assert_eq!(samples, vec![1.0, 2.0, 2.0, 1.0]);

        let mut odd = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        mirror_horizontal(&mut odd);
        assert_eq!(odd, vec![1.0, 2.0, 2.0, 1.0, 5.0]);
    }

    #[test]
    fn test_reverse_and_negate() {
        let mut samples = vec![1.0, -2.0, 3.0];
        reverse(&mut samples);
        negate(&mut samples);
        assert_eq!(samples, vec![-3.0, 2.0, -1.0]);
    }
}
