//! Reverse matching of an arbitrary cycle against the oscillator bank.
//!
//! Both strategies resample the input to [`SAMPLES_PER_CYCLE`], peak-normalize
//! it and compare it with peak-normalized reference cycles of every kind in
//! [`WaveformKind::ANALYSIS_CANDIDATES`]. The result is a shortlist of at most
//! [`MAX_MATCHES`] kinds whose weights sum to 1.0, or a lone sine when
//! nothing clears the acceptance threshold.

use log::{debug, warn};
use wavecraft_spec::{WaveformKind, WavetableFrame, WeightedWaveform, SAMPLES_PER_CYCLE};

use crate::error::CoreResult;
use crate::oscillator::{self, CycleParams};
use crate::table::normalize_peak;
use crate::transform::{FrequencyTransform, RustFftTransform};

/// Longest shortlist returned by either strategy.
pub const MAX_MATCHES: usize = 5;

/// Minimum normalized correlation for a correlation match.
pub const CORRELATION_THRESHOLD: f64 = 0.1;

/// Minimum similarity for a spectral match.
pub const SIMILARITY_THRESHOLD: f64 = 0.05;

/// Bins compared by the spectral strategy, DC excluded.
pub const SPECTRAL_BINS: usize = 512;

/// Distance-to-similarity decay constant.
const SIMILARITY_DECAY: f64 = 0.05;

/// Residual energy (relative to the input) below which correlation matching
/// stops extracting components.
const RESIDUAL_FLOOR: f64 = 1e-6;

/// Matching strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMethod {
    /// Time-domain correlation against reference cycles.
    Correlation,
    /// Frequency-weighted distance between magnitude spectra.
    #[default]
    Spectral,
}

/// Linearly interpolates `input` onto `len` points.
///
/// Source position of output sample `i` is `i * input.len() / len`; positions
/// at or past the last source sample take the last sample.
pub fn resample(input: &[f64], len: usize) -> Vec<f64> {
    if input.len() == len || input.is_empty() {
        return input.to_vec();
    }
    let last = input.len() - 1;
    (0..len)
        .map(|i| {
            let pos = i as f64 * input.len() as f64 / len as f64;
            let idx = pos as usize;
            if idx >= last {
                input[last]
            } else {
                let frac = pos - idx as f64;
                (1.0 - frac) * input[idx] + frac * input[idx + 1]
            }
        })
        .collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn mean_energy(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        dot(samples, samples) / samples.len() as f64
    }
}

/// Sorts by score, keeps the best [`MAX_MATCHES`] and rescales them to sum
/// to 1.0. Falls back to a lone sine.
fn shortlist(mut scored: Vec<(WaveformKind, f64)>) -> WavetableFrame {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(MAX_MATCHES);
    let total: f64 = scored.iter().map(|(_, score)| score).sum();
    if total <= 0.0 {
        return WavetableFrame::single(WaveformKind::Sine, 1.0);
    }
    scored
        .into_iter()
        .map(|(kind, score)| WeightedWaveform::new(kind, score / total))
        .collect()
}

struct Reference {
    kind: WaveformKind,
    samples: Vec<f64>,
    energy: f64,
}

/// Matches cycles against cached reference waveforms.
///
/// Reference cycles are generated once on construction; their spectra are
/// computed on the first spectral analysis.
pub struct WaveformMatcher<T: FrequencyTransform = RustFftTransform> {
    transform: T,
    references: Vec<Reference>,
    spectra: Option<Vec<Vec<f64>>>,
}

impl<T: FrequencyTransform> std::fmt::Debug for WaveformMatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveformMatcher")
            .field("references", &self.references.len())
            .field("spectra_cached", &self.spectra.is_some())
            .finish()
    }
}

impl Default for WaveformMatcher<RustFftTransform> {
    fn default() -> Self {
        Self::new(RustFftTransform::new())
    }
}

impl<T: FrequencyTransform> WaveformMatcher<T> {
    /// Creates a matcher that uses `transform` for spectral analysis.
    pub fn new(transform: T) -> Self {
        let params = CycleParams::default();
        let references = WaveformKind::ANALYSIS_CANDIDATES
            .iter()
            .map(|&kind| {
                let mut samples = oscillator::generate(kind, &params);
                normalize_peak(&mut samples);
                let energy = mean_energy(&samples);
                Reference {
                    kind,
                    samples,
                    energy,
                }
            })
            .collect();
        Self {
            transform,
            references,
            spectra: None,
        }
    }

    /// Analyzes `cycle` with the chosen strategy.
    pub fn analyze(&mut self, cycle: &[f64], method: MatchMethod) -> CoreResult<WavetableFrame> {
        match method {
            MatchMethod::Correlation => Ok(self.analyze_by_correlation(cycle)),
            MatchMethod::Spectral => self.analyze_by_spectrum(cycle),
        }
    }

    /// Correlation match.
    ///
    /// Candidates are extracted greedily: each round picks the unused
    /// reference with the highest energy-normalized correlation against the
    /// residual, stops if it does not exceed [`CORRELATION_THRESHOLD`], and
    /// otherwise subtracts its least-squares projection. A cycle that is
    /// exactly one reference therefore comes back alone at weight 1.0.
    pub fn analyze_by_correlation(&self, cycle: &[f64]) -> WavetableFrame {
        let Some(mut residual) = prepare(cycle) else {
            return WavetableFrame::single(WaveformKind::Sine, 1.0);
        };
        let input_energy = mean_energy(&residual);
        let len = residual.len() as f64;

        let mut used = vec![false; self.references.len()];
        let mut scored = Vec::new();

        while scored.len() < MAX_MATCHES {
            let residual_energy = mean_energy(&residual);
            if residual_energy <= input_energy * RESIDUAL_FLOOR {
                break;
            }

            let mut best: Option<(usize, f64, f64)> = None;
            for (i, reference) in self.references.iter().enumerate() {
                if used[i] || reference.energy <= 0.0 {
                    continue;
                }
                let correlation = dot(&residual, &reference.samples) / len;
                let score = correlation.abs() / (reference.energy * residual_energy).sqrt();
                if best.map_or(true, |(_, best_score, _)| score > best_score) {
                    best = Some((i, score, correlation));
                }
            }

            let Some((index, score, correlation)) = best else {
                break;
            };
            if score <= CORRELATION_THRESHOLD {
                break;
            }

            let reference = &self.references[index];
            let coefficient = correlation / reference.energy;
            for (r, s) in residual.iter_mut().zip(&reference.samples) {
                *r -= coefficient * s;
            }
            used[index] = true;
            scored.push((reference.kind, coefficient.abs()));
        }

        let frame = shortlist(scored);
        debug!("correlation match: {:?}", frame);
        frame
    }

    /// Spectral match over the first [`SPECTRAL_BINS`] bins.
    ///
    /// Distance is `sqrt(sum(diff^2 / (1 + 0.01 * i)))` over bins `1..512`
    /// and similarity is `exp(-0.05 * distance)`.
    pub fn analyze_by_spectrum(&mut self, cycle: &[f64]) -> CoreResult<WavetableFrame> {
        let Some(prepared) = prepare(cycle) else {
            return Ok(WavetableFrame::single(WaveformKind::Sine, 1.0));
        };
        let input = magnitudes(&mut self.transform, &prepared)?;
        self.cache_reference_spectra()?;
        let spectra = self.spectra.as_deref().unwrap_or_default();

        let scored = self
            .references
            .iter()
            .zip(spectra)
            .filter_map(|(reference, spectrum)| {
                let similarity = (-spectral_distance(&input, spectrum) * SIMILARITY_DECAY).exp();
                (similarity > SIMILARITY_THRESHOLD).then_some((reference.kind, similarity))
            })
            .collect();

        let frame = shortlist(scored);
        debug!("spectral match: {:?}", frame);
        Ok(frame)
    }

    fn cache_reference_spectra(&mut self) -> CoreResult<()> {
        if self.spectra.is_none() {
            let spectra = self
                .references
                .iter()
                .map(|reference| magnitudes(&mut self.transform, &reference.samples))
                .collect::<CoreResult<Vec<_>>>()?;
            debug!("cached {} reference spectra", spectra.len());
            self.spectra = Some(spectra);
        }
        Ok(())
    }
}

/// Resamples to the standard cycle length and peak-normalizes.
fn prepare(cycle: &[f64]) -> Option<Vec<f64>> {
    if cycle.is_empty() {
        warn!("cannot analyze an empty cycle");
        return None;
    }
    let mut samples = resample(cycle, SAMPLES_PER_CYCLE);
    if samples.iter().all(|&s| s == 0.0) {
        warn!("cannot analyze a silent cycle");
        return None;
    }
    normalize_peak(&mut samples);
    Some(samples)
}

fn magnitudes<T: FrequencyTransform>(transform: &mut T, samples: &[f64]) -> CoreResult<Vec<f64>> {
    Ok(transform
        .forward(samples)?
        .into_iter()
        .map(|bin| bin.magnitude)
        .collect())
}

fn spectral_distance(a: &[f64], b: &[f64]) -> f64 {
    let bins = a.len().min(b.len()).min(SPECTRAL_BINS);
    (1..bins)
        .map(|i| {
            let diff = a[i] - b[i];
            diff * diff / (1.0 + i as f64 * 0.01)
        })
        .sum::<f64>()
        .sqrt()
}

/// Correlation match with a freshly built matcher.
pub fn analyze_by_correlation(cycle: &[f64]) -> WavetableFrame {
    WaveformMatcher::default().analyze_by_correlation(cycle)
}

/// Spectral match with a freshly built matcher.
pub fn analyze_by_spectrum(cycle: &[f64]) -> CoreResult<WavetableFrame> {
    WaveformMatcher::default().analyze_by_spectrum(cycle)
}
