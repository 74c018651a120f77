//! Batch command implementation
//!
//! Fills a directory with randomly drawn wavetables.

use std::fs;
use std::process::ExitCode;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::batch::{run_batch, BatchConfig};

/// Seeds from the clock when no seed is given.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}

/// Run the batch command
///
/// # Arguments
/// * `config` - Pool, count and synthesis settings
/// * `seed` - Seed for the parameter picker (default: clock)
/// * `max_seconds` - Stop after this much wall time
///
/// # Returns
/// Exit code: 0 if every table was written or the run was cut short by
/// `max_seconds`, 1 if attempts ran out first
pub fn run(config: &BatchConfig, seed: Option<u64>, max_seconds: Option<f64>) -> Result<ExitCode> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let seed = resolve_seed(seed);
    info!("batch seed {}", seed);
    let mut rng = Pcg32::seed_from_u64(seed);

    println!(
        "{} {} table(s) into {}",
        "Generating:".cyan().bold(),
        config.count,
        config.output_dir.display()
    );
    println!("  {} {}", "seed:".dimmed(), seed);

    let start = Instant::now();
    let deadline = max_seconds
        .filter(|s| s.is_finite() && *s >= 0.0)
        .map(Duration::from_secs_f64);

    let summary = run_batch(config, &mut rng, |done, total| {
        println!("  [{}/{}]", done, total);
        deadline.map_or(true, |limit| start.elapsed() < limit)
    })?;

    println!();
    println!("{} {}", "Generated:".blue().bold(), summary.generated);
    println!("{} {}", "Skipped:".blue().bold(), summary.skipped);
    println!("{} {}", "Rejected:".blue().bold(), summary.failed);
    println!(
        "{} {:.2}s",
        "Runtime:".blue().bold(),
        start.elapsed().as_secs_f64()
    );

    if summary.generated == config.count || summary.cancelled {
        println!("{}", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} only {} of {} table(s) after {} attempts",
            "INCOMPLETE".yellow().bold(),
            summary.generated,
            config.count,
            summary.attempts
        );
        Ok(ExitCode::from(1))
    }
}
