//! Analyze command implementation
//!
//! Imports a `.wt` or `.wav` file and reports which library waveforms best
//! explain one of its frames.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use wavecraft_core::{MatchMethod, WaveformMatcher};
use wavecraft_io::import_wavetable;
use wavecraft_spec::{GenerationRequest, WavetableFrame};

/// Run the analyze command
///
/// # Arguments
/// * `input` - Path to a `.wt` or `.wav` file
/// * `frame` - Index of the frame to analyze
/// * `method` - Matching strategy
/// * `emit_request` - Print the shortlist as a generation request instead of a table
pub fn run(input: &Path, frame: usize, method: MatchMethod, emit_request: bool) -> Result<ExitCode> {
    let table = import_wavetable(input)
        .with_context(|| format!("Failed to import {}", input.display()))?;

    let cycle = table.frame(frame).with_context(|| {
        format!(
            "Frame {} out of range: {} has {} frame(s)",
            frame,
            input.display(),
            table.num_frames
        )
    })?;

    let mut matcher = WaveformMatcher::default();
    let shortlist = matcher
        .analyze(cycle, method)
        .context("Waveform analysis failed")?;

    if emit_request {
        let request = GenerationRequest::single(shortlist);
        println!("{}", request.to_json_pretty()?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Analyzing:".cyan().bold(), input.display());
    println!(
        "  {} {} of {} ({} samples, {} Hz)",
        "frame:".dimmed(),
        frame,
        table.num_frames,
        table.samples_per_frame,
        table.sample_rate
    );
    print_shortlist(&shortlist);
    Ok(ExitCode::SUCCESS)
}

fn print_shortlist(shortlist: &WavetableFrame) {
    for (rank, wave) in shortlist.iter().enumerate() {
        println!(
            "  {}. {:<16} {:>6.1}%",
            rank + 1,
            wave.kind.to_string().bold(),
            wave.weight * 100.0
        );
    }
}
