//! One-pole IIR filters run at the native rate.

/// Low-pass `y[n] = y[n-1] + cutoff * (x[n] - y[n-1])`, seeded with the
/// first sample. A cutoff of 1.0 passes everything.
pub fn lowpass(samples: &mut [f64], cutoff: f64) {
    let Some(&first) = samples.first() else {
        return;
    };
    let mut prev = first;
    for s in samples.iter_mut().skip(1) {
        *s = prev + cutoff * (*s - prev);
        prev = *s;
    }
}

/// Complementary high-pass with coefficient `1 - cutoff`. The first sample
/// is left as is.
pub fn highpass(samples: &mut [f64], cutoff: f64) {
    let Some(&first) = samples.first() else {
        return;
    };
    let alpha = 1.0 - cutoff;
    let mut prev_input = first;
    let mut prev_output = 0.0;
    for s in samples.iter_mut().skip(1) {
        let input = *s;
        let output = alpha * (prev_output + input - prev_input);
        *s = output;
        prev_input = input;
        prev_output = output;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lowpass_full_cutoff_is_identity() {
        let mut samples = vec![0.1, -0.5, 0.9];
        lowpass(&mut samples, 1.0);
        assert_eq!(samples, vec![0.1, -0.5, 0.9]);
    }

    #[test]
    fn test_lowpass_smooths_step() {
        let mut samples = vec![0.0, 1.0, 1.0, 1.0];
        lowpass(&mut samples, 0.5);
        assert_eq!(samples, vec![0.0, 0.5, 0.75, 0.875]);
    }

    #[test]
    fn test_highpass_removes_constant() {
        let mut samples = vec![0.5; 6];
        highpass(&mut samples, 0.3);
        assert_eq!(samples[0], 0.5);
        assert!(samples[1..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_empty_input() {
        let mut samples: Vec<f64> = Vec::new();
        lowpass(&mut samples, 0.5);
        highpass(&mut samples, 0.5);
        assert!(samples.is_empty());
    }
}
