//! Frame-major wavetable buffers and peak normalization.

/// Returns the largest absolute sample value, or 0.0 for an empty slice.
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0_f64, |a, b| a.max(b))
}

/// Divides every sample by the peak so the loudest sample is exactly +-1.0.
///
/// Silent input is left untouched.
pub fn normalize_peak(samples: &mut [f64]) {
    let current_peak = peak(samples);
    if current_peak > 0.0 {
        for sample in samples.iter_mut() {
            *sample /= current_peak;
        }
    }
}

/// Consecutive cycles of equal length stored in one flat buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    samples: Vec<f64>,
    samples_per_frame: usize,
}

impl Wavetable {
    /// Wraps a flat buffer. Trailing samples that do not fill a frame are
    /// not addressable through [`Wavetable::frame`].
    pub fn from_samples(samples: Vec<f64>, samples_per_frame: usize) -> Self {
        Self {
            samples,
            samples_per_frame,
        }
    }

    /// Builds a table by concatenating frames.
    pub fn from_frames<I>(frames: I, samples_per_frame: usize) -> Self
    where
        I: IntoIterator<Item = Vec<f64>>,
    {
        let mut samples = Vec::new();
        for frame in frames {
            samples.extend(frame);
        }
        Self {
            samples,
            samples_per_frame,
        }
    }

    /// Samples per frame.
    pub fn samples_per_frame(&self) -> usize {
        self.samples_per_frame
    }

    /// Number of complete frames.
    pub fn num_frames(&self) -> usize {
        if self.samples_per_frame == 0 {
            0
        } else {
            self.samples.len() / self.samples_per_frame
        }
    }

    /// The flat buffer.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Returns frame `index`, if present.
    pub fn frame(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.samples_per_frame)?;
        let end = start.checked_add(self.samples_per_frame)?;
        if self.samples_per_frame == 0 || end > self.samples.len() {
            return None;
        }
        Some(&self.samples[start..end])
    }

    /// Mutable access to frame `index`, if present.
    pub fn frame_mut(&mut self, index: usize) -> Option<&mut [f64]> {
        let start = index.checked_mul(self.samples_per_frame)?;
        let end = start.checked_add(self.samples_per_frame)?;
        if self.samples_per_frame == 0 || end > self.samples.len() {
            return None;
        }
        Some(&mut self.samples[start..end])
    }

    /// Iterates over complete frames.
    pub fn frames(&self) -> impl Iterator<Item = &[f64]> {
        self.samples
            .chunks_exact(self.samples_per_frame.max(1))
            .take(self.num_frames())
    }

    /// Largest absolute sample across every frame.
    pub fn peak(&self) -> f64 {
        peak(&self.samples)
    }

    /// One normalization pass over the whole table.
    pub fn normalize(&mut self) {
        normalize_peak(&mut self.samples);
    }

    /// Consumes the table, returning the flat buffer.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}
