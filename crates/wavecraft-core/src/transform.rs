//! Real-valued frequency transforms exposed as magnitude/phase bins.
//!
//! Effect code only ever sees [`FrequencyBin`]s. The transform owns its plan
//! and reconfigures itself when called with a different block size; callers
//! that generate concurrently give each worker its own instance.

use std::fmt;
use std::sync::Arc;

use log::debug;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::{CoreError, CoreResult};

/// One bin of a one-sided spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBin {
    /// Non-negative magnitude.
    pub magnitude: f64,
    /// Phase in radians.
    pub phase: f64,
}

impl FrequencyBin {
    /// Creates a bin from magnitude and phase.
    pub fn new(magnitude: f64, phase: f64) -> Self {
        Self { magnitude, phase }
    }

    /// A bin with zero magnitude and phase.
    pub fn silent() -> Self {
        Self::new(0.0, 0.0)
    }

    fn from_complex(c: Complex<f64>) -> Self {
        Self::new(c.norm(), c.arg())
    }

    fn to_complex(self) -> Complex<f64> {
        Complex::from_polar(self.magnitude, self.phase)
    }
}

/// Number of one-sided bins for a block of `size` samples.
pub fn bin_count(size: usize) -> usize {
    size / 2 + 1
}

/// Forward/inverse real transform over power-of-two blocks.
///
/// `forward` is unnormalized; `inverse` divides by the block size, so a
/// forward/inverse round trip returns the input.
pub trait FrequencyTransform {
    /// Transforms `samples` into `samples.len() / 2 + 1` bins.
    fn forward(&mut self, samples: &[f64]) -> CoreResult<Vec<FrequencyBin>>;

    /// Transforms a one-sided spectrum of `size / 2 + 1` bins back into
    /// `size` samples.
    fn inverse(&mut self, bins: &[FrequencyBin], size: usize) -> CoreResult<Vec<f64>>;

    /// Block size of the current configuration, or 0 if none yet.
    fn size(&self) -> usize;
}

/// [`FrequencyTransform`] backed by `rustfft`, re-planned lazily on size
/// changes.
pub struct RustFftTransform {
    planner: FftPlanner<f64>,
    size: usize,
    forward: Option<Arc<dyn Fft<f64>>>,
    inverse: Option<Arc<dyn Fft<f64>>>,
    buffer: Vec<Complex<f64>>,
}

impl fmt::Debug for RustFftTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RustFftTransform")
            .field("size", &self.size)
            .finish()
    }
}

impl Default for RustFftTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl RustFftTransform {
    /// Creates an unconfigured transform.
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            size: 0,
            forward: None,
            inverse: None,
            buffer: Vec::new(),
        }
    }

    /// Creates a transform already planned for `size`.
    pub fn with_size(size: usize) -> CoreResult<Self> {
        let mut transform = Self::new();
        transform.configure(size)?;
        Ok(transform)
    }

    fn configure(&mut self, size: usize) -> CoreResult<()> {
        if size == 0 || !size.is_power_of_two() {
            return Err(CoreError::InvalidTransformSize { size });
        }
        if size != self.size || self.forward.is_none() {
            debug!("configuring frequency transform: {} -> {}", self.size, size);
            self.forward = Some(self.planner.plan_fft_forward(size));
            self.inverse = Some(self.planner.plan_fft_inverse(size));
            self.size = size;
        }
        Ok(())
    }
}

impl FrequencyTransform for RustFftTransform {
    fn forward(&mut self, samples: &[f64]) -> CoreResult<Vec<FrequencyBin>> {
        let size = samples.len();
        self.configure(size)?;

        self.buffer.clear();
        self.buffer
            .extend(samples.iter().map(|&s| Complex::new(s, 0.0)));
        if let Some(fft) = &self.forward {
            fft.process(&mut self.buffer);
        }

        Ok(self.buffer[..bin_count(size)]
            .iter()
            .map(|&c| FrequencyBin::from_complex(c))
            .collect())
    }

    fn inverse(&mut self, bins: &[FrequencyBin], size: usize) -> CoreResult<Vec<f64>> {
        self.configure(size)?;
        let expected = bin_count(size);
        if bins.len() != expected {
            return Err(CoreError::BinCountMismatch {
                expected,
                actual: bins.len(),
            });
        }

        // Rebuild the full Hermitian spectrum from the one-sided bins.
        self.buffer.clear();
        self.buffer.resize(size, Complex::new(0.0, 0.0));
        for (k, bin) in bins.iter().enumerate() {
            let c = bin.to_complex();
            self.buffer[k] = c;
            if k > 0 && k < size - k {
                self.buffer[size - k] = c.conj();
            }
        }
        if let Some(fft) = &self.inverse {
            fft.process(&mut self.buffer);
        }

        let scale = 1.0 / size as f64;
        Ok(self.buffer.iter().map(|c| c.re * scale).collect())
    }

    fn size(&self) -> usize {
        self.size
    }
}
