//! Random batch generation.
//!
//! Each attempt draws a random start and end selection from the pool, a
//! morph toggle and a frame count, derives a file name from the resulting
//! request and writes the table unless that name already exists.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use rand::Rng;
use wavecraft_core::{derive_filename_tag, WavetableGenerator};
use wavecraft_io::{writer_for, IoError, TableView};
use wavecraft_spec::{
    EffectsConfiguration, GenerationRequest, MorphCurve, OutputFormat, WavetableFrame,
    DEFAULT_MAX_HARMONICS, DEFAULT_PULSE_DUTY,
};

use crate::recipe::AvailableWaveform;

/// Probability that an attempt morphs between its two selections.
pub const MORPH_PROBABILITY: f64 = 0.7;

/// Frame counts a morphing attempt picks from.
pub const FRAME_OPTIONS: [u32; 4] = [64, 128, 256, 512];

/// Attempts allowed per requested table.
pub const ATTEMPTS_PER_TABLE: usize = 1000;

/// Settings shared by every table in a batch.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory the tables are written to.
    pub output_dir: PathBuf,
    /// Number of tables to write.
    pub count: usize,
    /// Fewest kinds per selection.
    pub min_waves: usize,
    /// Most kinds per selection.
    pub max_waves: usize,
    /// Kinds to draw from.
    pub pool: Vec<AvailableWaveform>,
    /// Output container. Previews are always `.wav`.
    pub format: OutputFormat,
    /// Write audio previews instead of tables.
    pub preview: bool,
    /// Effects applied to every table.
    pub effects: EffectsConfiguration,
    /// Morph curve.
    pub curve: MorphCurve,
    /// Pulse duty cycle.
    pub pulse_duty: f64,
    /// Harmonic limit.
    pub max_harmonics: u32,
}

impl BatchConfig {
    /// Creates a config with default synthesis settings.
    pub fn new(output_dir: impl Into<PathBuf>, count: usize, pool: Vec<AvailableWaveform>) -> Self {
        Self {
            output_dir: output_dir.into(),
            count,
            min_waves: 1,
            max_waves: 3,
            pool,
            format: OutputFormat::Wt,
            preview: false,
            effects: EffectsConfiguration::default(),
            curve: MorphCurve::Linear,
            pulse_duty: DEFAULT_PULSE_DUTY,
            max_harmonics: DEFAULT_MAX_HARMONICS,
        }
    }

    fn output_format(&self) -> OutputFormat {
        if self.preview {
            OutputFormat::Wav
        } else {
            self.format
        }
    }
}

/// What a batch run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Tables written.
    pub generated: usize,
    /// Attempts made.
    pub attempts: usize,
    /// Attempts whose file name already existed.
    pub skipped: usize,
    /// Attempts rejected by generation or validation.
    pub failed: usize,
    /// The progress callback asked to stop.
    pub cancelled: bool,
    /// Files written, in order.
    pub written: Vec<PathBuf>,
}

/// Draws between `min_waves` and `max_waves` distinct kinds from `pool`,
/// each weighted uniformly within its range.
pub fn random_selection<R: Rng + ?Sized>(
    rng: &mut R,
    min_waves: usize,
    max_waves: usize,
    pool: &[AvailableWaveform],
) -> WavetableFrame {
    let mut frame = WavetableFrame::default();
    if pool.is_empty() {
        return frame;
    }

    let upper = max_waves.min(pool.len());
    let lower = min_waves.min(upper);
    let count = rng.gen_range(lower..=upper);

    let mut used = vec![false; pool.len()];
    for _ in 0..count {
        let mut index = rng.gen_range(0..pool.len());
        while used[index] {
            index = rng.gen_range(0..pool.len());
        }
        used[index] = true;

        let available = &pool[index];
        let weight = rng.gen_range(available.min_weight..=available.max_weight);
        frame.push(available.kind, weight);
    }
    frame
}

/// Writes up to `config.count` random tables into `config.output_dir`.
///
/// `progress` is called with `(written, count)` after every table and the
/// run stops when it returns `false`. Generation failures are counted and
/// retried with a new draw; a file system failure ends the run with an
/// error. At most `count * 1000` attempts are made.
pub fn run_batch<R, F>(config: &BatchConfig, rng: &mut R, mut progress: F) -> Result<BatchSummary>
where
    R: Rng + ?Sized,
    F: FnMut(usize, usize) -> bool,
{
    let mut summary = BatchSummary::default();
    if config.pool.is_empty() || config.count == 0 {
        warn!("nothing to generate: empty pool or zero count");
        return Ok(summary);
    }

    let format = config.output_format();
    let writer = writer_for(format);
    let mut generator = WavetableGenerator::default();
    let max_attempts = config.count.saturating_mul(ATTEMPTS_PER_TABLE);

    while summary.generated < config.count && summary.attempts < max_attempts {
        summary.attempts += 1;

        let morph = rng.gen_bool(MORPH_PROBABILITY);
        let start = random_selection(rng, config.min_waves, config.max_waves, &config.pool);
        let end = random_selection(rng, config.min_waves, config.max_waves, &config.pool);
        let num_frames = FRAME_OPTIONS[rng.gen_range(0..FRAME_OPTIONS.len())];

        let request = GenerationRequest {
            start,
            end: Some(end),
            morph,
            num_frames: if morph { num_frames } else { 1 },
            curve: config.curve,
            pulse_duty: config.pulse_duty,
            max_harmonics: config.max_harmonics,
            preview: config.preview,
            format,
            effects: config.effects.clone(),
            seed: 0,
        };

        let path = output_path(&config.output_dir, &derive_filename_tag(&request), format);
        if path.exists() {
            summary.skipped += 1;
            continue;
        }

        let table = match generator.generate(&request) {
            Ok(table) => table,
            Err(e) => {
                debug!("attempt {} rejected: {}", summary.attempts, e);
                summary.failed += 1;
                continue;
            }
        };

        let view = TableView::new(
            &table.samples,
            table.num_frames,
            table.samples_per_frame,
            table.sample_rate,
        );
        match writer.write(&path, &view) {
            Ok(()) => {}
            Err(IoError::Spec(e)) => {
                debug!("attempt {} rejected: {}", summary.attempts, e);
                summary.failed += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to write {}", path.display()));
            }
        }

        summary.generated += 1;
        summary.written.push(path);
        if !progress(summary.generated, config.count) {
            summary.cancelled = true;
            break;
        }
    }

    if summary.generated < config.count && !summary.cancelled {
        warn!(
            "stopped after {} attempts with {} of {} tables",
            summary.attempts, summary.generated, config.count
        );
    }
    Ok(summary)
}

/// `dir/tag.ext`.
pub fn output_path(dir: &Path, tag: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", tag, format.extension()))
}
