//! Tables handed to writers and returned by importers.

use std::path::PathBuf;

/// Borrowed view of a frame-major table ready to be written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableView<'a> {
    /// Frame-major samples.
    pub samples: &'a [f64],
    /// Number of frames.
    pub num_frames: usize,
    /// Samples per frame.
    pub samples_per_frame: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl<'a> TableView<'a> {
    /// Creates a view.
    pub fn new(samples: &'a [f64], num_frames: usize, samples_per_frame: usize, sample_rate: u32) -> Self {
        Self {
            samples,
            num_frames,
            samples_per_frame,
            sample_rate,
        }
    }
}

/// A wavetable read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedWavetable {
    /// Frame-major samples in [-1, 1].
    pub samples: Vec<f64>,
    /// Number of frames.
    pub num_frames: usize,
    /// Samples per frame.
    pub samples_per_frame: usize,
    /// Sample rate in Hz. `.wt` files do not store one and report 44100.
    pub sample_rate: u32,
    /// File the table came from, if any.
    pub source: Option<PathBuf>,
}

impl ImportedWavetable {
    /// Returns frame `index`, if present.
    pub fn frame(&self, index: usize) -> Option<&[f64]> {
        if index >= self.num_frames {
            return None;
        }
        let start = index.checked_mul(self.samples_per_frame)?;
        self.samples.get(start..start + self.samples_per_frame)
    }

    /// Views the table for re-encoding.
    pub fn view(&self) -> TableView<'_> {
        TableView::new(&self.samples, self.num_frames, self.samples_per_frame, self.sample_rate)
    }
}

/// Infers the frame layout of a headerless sample run.
///
/// Picks the first of 2048, 1024, 512, 256 and 128 that divides `len`;
/// otherwise the whole run is one frame.
pub fn infer_frame_layout(len: usize) -> (usize, usize) {
    const COMMON_SIZES: [usize; 5] = [2048, 1024, 512, 256, 128];
    match COMMON_SIZES.iter().find(|&&size| len >= size && len % size == 0) {
        Some(&size) => (len / size, size),
        None => (1, len),
    }
}
