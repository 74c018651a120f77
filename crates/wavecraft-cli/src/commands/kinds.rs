//! Kinds command implementation
//!
//! Lists the waveform catalogue grouped by family.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use wavecraft_spec::{WaveformFamily, WaveformKind};

/// Returns the catalogue grouped by family, in catalogue order.
pub fn grouped() -> Vec<(WaveformFamily, Vec<WaveformKind>)> {
    let mut groups: Vec<(WaveformFamily, Vec<WaveformKind>)> = Vec::new();
    for kind in WaveformKind::ALL {
        let family = kind.family();
        match groups.iter_mut().find(|(f, _)| *f == family) {
            Some((_, kinds)) => kinds.push(kind),
            None => groups.push((family, vec![kind])),
        }
    }
    groups
}

/// Run the kinds command
///
/// # Arguments
/// * `json` - Print the grouping as JSON
pub fn run(json: bool) -> Result<ExitCode> {
    let groups = grouped();

    if json {
        let value: serde_json::Map<String, serde_json::Value> = groups
            .iter()
            .map(|(family, kinds)| {
                let names = kinds.iter().map(|k| serde_json::Value::from(k.name())).collect();
                (family.name().to_string(), serde_json::Value::Array(names))
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(ExitCode::SUCCESS);
    }

    for (family, kinds) in &groups {
        println!("{}", family.name().cyan().bold());
        let names: Vec<&str> = kinds.iter().map(|k| k.name()).collect();
        println!("  {}", names.join(", "));
    }
    println!();
    println!("{} kinds", WaveformKind::ALL.len());
    Ok(ExitCode::SUCCESS)
}
