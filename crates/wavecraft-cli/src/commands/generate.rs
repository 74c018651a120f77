//! Generate command implementation
//!
//! Builds a request from a JSON recipe or from flags, generates the table
//! and writes it next to its derived file name.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use wavecraft_core::{derive_filename_tag, generate_wavetable};
use wavecraft_spec::{GenerationRequest, OutputFormat};

use super::write_table;

/// Where the generated file goes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTarget {
    /// Explicit output path. Overrides `out_dir`.
    pub output: Option<PathBuf>,
    /// Directory for the derived file name (default: current directory).
    pub out_dir: Option<PathBuf>,
}

impl OutputTarget {
    /// Resolves the output path for `request`.
    pub fn resolve(&self, request: &GenerationRequest) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let format = effective_format(request);
        let dir = self.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        dir.join(format!(
            "{}.{}",
            derive_filename_tag(request),
            format.extension()
        ))
    }
}

fn effective_format(request: &GenerationRequest) -> OutputFormat {
    if request.preview {
        OutputFormat::Wav
    } else {
        request.format
    }
}

/// Loads a request from a JSON recipe file.
pub fn load_request(path: &Path) -> Result<GenerationRequest> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipe: {}", path.display()))?;
    GenerationRequest::from_json(&json)
        .with_context(|| format!("Failed to parse recipe: {}", path.display()))
}

/// Run the generate command
///
/// # Arguments
/// * `request` - The request built from a recipe file or flags
/// * `target` - Output path selection
/// * `print_request` - Print the effective request as JSON instead of generating
///
/// # Returns
/// Exit code: 0 success, 1 generation or write failure
pub fn run(request: &GenerationRequest, target: &OutputTarget, print_request: bool) -> Result<ExitCode> {
    if print_request {
        println!("{}", request.to_json_pretty()?);
        return Ok(ExitCode::SUCCESS);
    }

    let path = target.resolve(request);
    println!("{} {}", "Generating:".cyan().bold(), path.display());
    println!(
        "  {} {}  {} {}",
        "frames:".dimmed(),
        request.frame_count(),
        "preview:".dimmed(),
        if request.preview { "yes" } else { "no" }
    );

    let table = generate_wavetable(request).context("Generation failed")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    write_table(&table, effective_format(request), &path)?;

    println!(
        "{} wrote {} frame(s) x {} samples to {}",
        "SUCCESS".green().bold(),
        table.num_frames,
        table.samples_per_frame,
        path.display()
    );
    Ok(ExitCode::SUCCESS)
}
