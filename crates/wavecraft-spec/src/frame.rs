//! Weighted waveform selections.

use serde::{Deserialize, Serialize};

use crate::kind::WaveformKind;

/// One oscillator kind with its blend weight.
///
/// Weights are conventionally in 0.0-1.0 but are not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightedWaveform {
    /// Oscillator recipe.
    pub kind: WaveformKind,
    /// Blend weight.
    pub weight: f64,
}

impl WeightedWaveform {
    /// Creates a weighted waveform.
    pub fn new(kind: WaveformKind, weight: f64) -> Self {
        Self { kind, weight }
    }
}

/// The recipe for one cycle: an ordered list of weighted waveforms.
///
/// Kinds may repeat; consumers that need one entry per kind call
/// [`WavetableFrame::merged`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WavetableFrame {
    /// Entries in caller order.
    pub waves: Vec<WeightedWaveform>,
}

impl WavetableFrame {
    /// Creates a frame from its entries.
    pub fn new(waves: Vec<WeightedWaveform>) -> Self {
        Self { waves }
    }

    /// Creates a frame with a single entry.
    pub fn single(kind: WaveformKind, weight: f64) -> Self {
        Self {
            waves: vec![WeightedWaveform::new(kind, weight)],
        }
    }

    /// Appends an entry.
    pub fn push(&mut self, kind: WaveformKind, weight: f64) {
        self.waves.push(WeightedWaveform::new(kind, weight));
    }

    /// Returns true if the frame has no entries.
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, WeightedWaveform> {
        self.waves.iter()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.waves.iter().map(|w| w.weight).sum()
    }

    /// Weight for `kind`, summed over duplicate entries.
    pub fn weight_of(&self, kind: WaveformKind) -> f64 {
        self.waves
            .iter()
            .filter(|w| w.kind == kind)
            .map(|w| w.weight)
            .sum()
    }

    /// Collapses duplicate kinds by summing their weights.
    ///
    /// The first occurrence of each kind fixes its position.
    pub fn merged(&self) -> Self {
        let mut out: Vec<WeightedWaveform> = Vec::with_capacity(self.waves.len());
        for wave in &self.waves {
            match out.iter_mut().find(|w| w.kind == wave.kind) {
                Some(existing) => existing.weight += wave.weight,
                None => out.push(*wave),
            }
        }
        Self { waves: out }
    }

    /// Returns the entries in reverse order.
    pub fn reversed(&self) -> Self {
        Self {
            waves: self.waves.iter().rev().copied().collect(),
        }
    }
}

impl FromIterator<WeightedWaveform> for WavetableFrame {
    fn from_iter<I: IntoIterator<Item = WeightedWaveform>>(iter: I) -> Self {
        Self {
            waves: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a WavetableFrame {
    type Item = &'a WeightedWaveform;
    type IntoIter = std::slice::Iter<'a, WeightedWaveform>;

    fn into_iter(self) -> Self::IntoIter {
        self.waves.iter()
    }
}
