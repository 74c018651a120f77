//! Generate and analyze commands against a temporary directory.

use std::path::PathBuf;
use std::process::ExitCode;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wavecraft_cli::commands::generate::{load_request, run, OutputTarget};
use wavecraft_cli::commands::{analyze, kinds};
use wavecraft_core::MatchMethod;
use wavecraft_io::import_wavetable;
use wavecraft_spec::{GenerationRequest, OutputFormat, WaveformKind, WavetableFrame};

#[test]
fn test_generate_writes_derived_name() {
    let dir = TempDir::new().unwrap();
    let request = GenerationRequest::morphing(
        WavetableFrame::single(WaveformKind::Saw, 1.0),
        Some(WavetableFrame::single(WaveformKind::Square, 0.5)),
        8,
    );
    let target = OutputTarget {
        output: None,
        out_dir: Some(dir.path().join("nested")),
    };

    assert_eq!(run(&request, &target, false).unwrap(), ExitCode::SUCCESS);

    let path = dir.path().join("nested").join("Saw100_to_Square50.wt");
    let table = import_wavetable(&path).unwrap();
    assert_eq!(table.num_frames, 8);
    assert_eq!(table.samples_per_frame, 2048);
}

#[test]
fn test_print_request_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let request = GenerationRequest::single(WavetableFrame::single(WaveformKind::Sine, 1.0));
    let target = OutputTarget {
        output: None,
        out_dir: Some(dir.path().to_path_buf()),
    };

    assert_eq!(run(&request, &target, true).unwrap(), ExitCode::SUCCESS);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_recipe_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let recipe = dir.path().join("recipe.json");
    std::fs::write(
        &recipe,
        r#"{
            "start": [{"kind": "Sine", "weight": 1.0}],
            "format": "wav",
            "effects": {"reverse": true}
        }"#,
    )
    .unwrap();

    let request = load_request(&recipe).unwrap();
    assert_eq!(request.format, OutputFormat::Wav);
    assert!(request.effects.reverse);

    let output = dir.path().join("out.wav");
    let target = OutputTarget {
        output: Some(output.clone()),
        out_dir: None,
    };
    run(&request, &target, false).unwrap();
    let table = import_wavetable(&output).unwrap();
    assert_eq!(table.samples.len(), 2048);
}

#[test]
fn test_bad_recipe_is_an_error() {
    let dir = TempDir::new().unwrap();
    let recipe = dir.path().join("recipe.json");
    std::fs::write(&recipe, r#"{"start": [], "colour": "blue"}"#).unwrap();
    assert!(load_request(&recipe).is_err());
    assert!(load_request(&PathBuf::from("/nonexistent/recipe.json")).is_err());
}

#[test]
fn test_empty_start_fails_generation() {
    let dir = TempDir::new().unwrap();
    let request = GenerationRequest::single(WavetableFrame::default());
    let target = OutputTarget {
        output: Some(dir.path().join("empty.wt")),
        out_dir: None,
    };
    assert!(run(&request, &target, false).is_err());
    assert!(!dir.path().join("empty.wt").exists());
}

#[test]
fn test_analyze_generated_table() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("sine.wt");
    let request = GenerationRequest::single(WavetableFrame::single(WaveformKind::Sine, 1.0));
    run(
        &request,
        &OutputTarget {
            output: Some(output.clone()),
            out_dir: None,
        },
        false,
    )
    .unwrap();

    for method in [MatchMethod::Correlation, MatchMethod::Spectral] {
        assert_eq!(
            analyze::run(&output, 0, method, false).unwrap(),
            ExitCode::SUCCESS
        );
    }
    assert!(analyze::run(&output, 1, MatchMethod::Spectral, false).is_err());
}

#[test]
fn test_kinds_runs() {
    assert_eq!(kinds::run(false).unwrap(), ExitCode::SUCCESS);
    assert_eq!(kinds::run(true).unwrap(), ExitCode::SUCCESS);
}
