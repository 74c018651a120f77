//! Parsers for waveform lists written on the command line.
//!
//! Frames are given as comma-separated `Kind[:weight]` entries, e.g.
//! `Sine:1.0,Saw:0.5`. Batch pool entries are `Kind[:min[-max]]`, e.g.
//! `Sine:0.2-1.0`. Clap splits on the commas; the functions here parse one
//! entry each.

use wavecraft_spec::{WaveformKind, WavetableFrame, WeightedWaveform};

/// A kind the batch driver may pick, with the range its weight is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailableWaveform {
    /// Oscillator recipe.
    pub kind: WaveformKind,
    /// Lowest weight drawn.
    pub min_weight: f64,
    /// Highest weight drawn.
    pub max_weight: f64,
}

impl AvailableWaveform {
    /// Creates a pool entry, ordering the bounds.
    pub fn new(kind: WaveformKind, min_weight: f64, max_weight: f64) -> Self {
        Self {
            kind,
            min_weight: min_weight.min(max_weight),
            max_weight: min_weight.max(max_weight),
        }
    }
}

fn parse_weight(text: &str, entry: &str) -> Result<f64, String> {
    let weight: f64 = text
        .trim()
        .parse()
        .map_err(|_| format!("invalid weight '{}' in '{}'", text, entry))?;
    if !weight.is_finite() {
        return Err(format!("weight must be finite in '{}'", entry));
    }
    Ok(weight)
}

fn parse_kind(text: &str) -> Result<WaveformKind, String> {
    text.trim().parse().map_err(|e| format!("{}", e))
}

/// Parses `Kind[:weight]`. A missing weight means 1.0.
pub fn parse_weighted(entry: &str) -> Result<WeightedWaveform, String> {
    match entry.split_once(':') {
        Some((kind, weight)) => Ok(WeightedWaveform::new(
            parse_kind(kind)?,
            parse_weight(weight, entry)?,
        )),
        None => Ok(WeightedWaveform::new(parse_kind(entry)?, 1.0)),
    }
}

/// Parses `Kind[:min[-max]]`.
///
/// A bare kind draws from 0.0-1.0 and a single number pins the weight.
pub fn parse_available(entry: &str) -> Result<AvailableWaveform, String> {
    let Some((kind, range)) = entry.split_once(':') else {
        return Ok(AvailableWaveform::new(parse_kind(entry)?, 0.0, 1.0));
    };
    let kind = parse_kind(kind)?;
    match range.split_once('-') {
        Some((min, max)) => Ok(AvailableWaveform::new(
            kind,
            parse_weight(min, entry)?,
            parse_weight(max, entry)?,
        )),
        None => {
            let weight = parse_weight(range, entry)?;
            Ok(AvailableWaveform::new(kind, weight, weight))
        }
    }
}

/// Builds a frame from parsed entries.
pub fn frame_from(entries: &[WeightedWaveform]) -> WavetableFrame {
    WavetableFrame::new(entries.to_vec())
}

/// The whole catalogue, each kind drawing its weight from 0.0-1.0.
pub fn full_pool() -> Vec<AvailableWaveform> {
    WaveformKind::ALL
        .iter()
        .map(|&kind| AvailableWaveform::new(kind, 0.0, 1.0))
        .collect()
}
