//! Wavecraft CLI - Command-line interface for wavetable synthesis
//!
//! This binary generates single-cycle and morphing wavetables, renders
//! audio previews, analyzes existing tables and fills directories with
//! randomly drawn tables.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use wavecraft_cli::batch::BatchConfig;
use wavecraft_cli::commands;
use wavecraft_cli::commands::generate::OutputTarget;
use wavecraft_cli::recipe::{
    frame_from, full_pool, parse_available, parse_weighted, AvailableWaveform,
};
use wavecraft_core::MatchMethod;
use wavecraft_spec::{
    DistortionKind, EffectsConfiguration, GenerationRequest, MorphCurve, OutputFormat,
    WeightedWaveform, DEFAULT_MAX_HARMONICS, DEFAULT_PULSE_DUTY,
};

/// Wavecraft - Wavetable Generator
#[derive(Parser)]
#[command(name = "wavecraft")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a wavetable or audio preview
    Generate(GenerateArgs),

    /// Report which library waveforms best explain a frame of a .wt or .wav file
    Analyze {
        /// Path to the input file (.wt or .wav)
        input: PathBuf,

        /// Frame index to analyze
        #[arg(short, long, default_value_t = 0)]
        frame: usize,

        /// Matching strategy
        #[arg(short, long, value_enum, default_value_t = MethodArg::Spectral)]
        method: MethodArg,

        /// Print the result as a generation request (JSON)
        #[arg(long)]
        emit_request: bool,
    },

    /// Generate a directory of random wavetables
    Batch(BatchArgs),

    /// List the waveform kinds grouped by family
    Kinds {
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Path to a JSON request; other synthesis flags are ignored when given
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    recipe: Option<PathBuf>,

    /// Start frame as comma-separated Kind[:weight] entries
    #[arg(
        short,
        long,
        value_delimiter = ',',
        value_parser = parse_weighted,
        required_unless_present = "recipe"
    )]
    start: Vec<WeightedWaveform>,

    /// End frame as comma-separated Kind[:weight] entries (implies --morph)
    #[arg(short, long, value_delimiter = ',', value_parser = parse_weighted)]
    end: Vec<WeightedWaveform>,

    /// Morph from the start frame to the end frame
    #[arg(long)]
    morph: bool,

    /// Number of frames when morphing
    #[arg(long, default_value_t = 64)]
    frames: u32,

    #[command(flatten)]
    synth: SynthArgs,

    /// Seed for noise-driven waveform kinds
    #[arg(long, default_value_t = 0)]
    seed: u32,

    #[command(flatten)]
    effects: EffectArgs,

    /// Output file path (default: derived from the request)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the derived file name (default: current directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the effective request as JSON and exit
    #[arg(long)]
    print_request: bool,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Output directory
    #[arg(short, long)]
    out_dir: PathBuf,

    /// Number of tables to generate
    #[arg(short = 'n', long, default_value_t = 10)]
    count: usize,

    /// Fewest waveforms per frame
    #[arg(long, default_value_t = 1)]
    min_waves: usize,

    /// Most waveforms per frame
    #[arg(long, default_value_t = 3)]
    max_waves: usize,

    /// Waveforms to draw from as Kind[:min[-max]] entries (default: all kinds, 0-1)
    #[arg(long, value_delimiter = ',', value_parser = parse_available)]
    pool: Vec<AvailableWaveform>,

    #[command(flatten)]
    synth: SynthArgs,

    #[command(flatten)]
    effects: EffectArgs,

    /// Seed for the parameter picker (default: clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many seconds
    #[arg(long)]
    max_seconds: Option<f64>,
}

/// Settings shared by `generate` and `batch`.
#[derive(Args, Debug)]
struct SynthArgs {
    /// Morph curve
    #[arg(long, value_enum, default_value_t = CurveArg::Linear)]
    curve: CurveArg,

    /// Duty cycle of the Pulse kind, in (0, 1)
    #[arg(long, default_value_t = DEFAULT_PULSE_DUTY)]
    pulse_duty: f64,

    /// Harmonic limit for the additive kinds
    #[arg(long, default_value_t = DEFAULT_MAX_HARMONICS)]
    max_harmonics: u32,

    /// Render a two-second audio preview (.wav) instead of a table
    #[arg(long)]
    preview: bool,

    /// Output container
    #[arg(long, value_enum, default_value_t = FormatArg::Wt)]
    format: FormatArg,
}

#[derive(Args, Debug)]
struct EffectArgs {
    /// Play each cycle backwards
    #[arg(long)]
    reverse: bool,

    /// Mirror the first half of each cycle onto the second
    #[arg(long)]
    mirror_horizontal: bool,

    /// Flip each cycle upside down
    #[arg(long)]
    mirror_vertical: bool,

    /// Invert the polarity
    #[arg(long)]
    invert: bool,

    /// Distortion curve
    #[arg(long, value_enum, default_value_t = DistortionArg::None)]
    distortion: DistortionArg,

    /// Distortion amount, 0-1
    #[arg(long, default_value_t = 0.0)]
    distortion_amount: f64,

    /// Wavefold amount, 0-1
    #[arg(long)]
    wavefold: Option<f64>,

    /// Bit-crush to this many bits, 1-16
    #[arg(long)]
    bit_depth: Option<u32>,

    /// Hold every sample for this many samples
    #[arg(long, default_value_t = 1)]
    sample_rate_reduction: u32,

    /// One-pole low-pass coefficient, 0-1
    #[arg(long)]
    lowpass: Option<f64>,

    /// One-pole high-pass coefficient, 0-1
    #[arg(long)]
    highpass: Option<f64>,

    /// Spectral decay amount, 0-1
    #[arg(long)]
    spectral_decay: Option<f64>,

    /// Exponent of the spectral decay curve
    #[arg(long, default_value_t = 1.0)]
    spectral_decay_curve: f64,

    /// Spectral tilt, -1 to 1
    #[arg(long, allow_hyphen_values = true)]
    spectral_tilt: Option<f64>,

    /// Spectral gate threshold relative to the loudest bin, 0-1
    #[arg(long)]
    spectral_gate: Option<f64>,

    /// Shift every bin by this many bins
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    spectral_shift: i32,

    /// Phase randomization amount, 0-1
    #[arg(long)]
    phase_randomize: Option<f64>,

    /// Seed for phase randomization
    #[arg(long, default_value_t = 0)]
    fx_seed: u32,
}

impl EffectArgs {
    fn to_config(&self) -> EffectsConfiguration {
        EffectsConfiguration {
            reverse: self.reverse,
            mirror_horizontal: self.mirror_horizontal,
            mirror_vertical: self.mirror_vertical,
            invert: self.invert,
            distortion: self.distortion.into(),
            distortion_amount: self.distortion_amount,
            wavefold_enabled: self.wavefold.is_some(),
            wavefold_amount: self.wavefold.unwrap_or(0.0),
            bitcrush_enabled: self.bit_depth.is_some(),
            bit_depth: self.bit_depth.unwrap_or(16),
            sample_rate_reduction: self.sample_rate_reduction,
            lowpass_enabled: self.lowpass.is_some(),
            lowpass_cutoff: self.lowpass.unwrap_or(1.0),
            highpass_enabled: self.highpass.is_some(),
            highpass_cutoff: self.highpass.unwrap_or(0.0),
            spectral_decay_enabled: self.spectral_decay.is_some(),
            spectral_decay_amount: self.spectral_decay.unwrap_or(0.0),
            spectral_decay_curve: self.spectral_decay_curve,
            spectral_tilt_enabled: self.spectral_tilt.is_some(),
            spectral_tilt: self.spectral_tilt.unwrap_or(0.0),
            spectral_gate_enabled: self.spectral_gate.is_some(),
            spectral_gate_threshold: self.spectral_gate.unwrap_or(0.0),
            phase_randomize_enabled: self.phase_randomize.is_some(),
            phase_randomize_amount: self.phase_randomize.unwrap_or(0.0),
            spectral_shift: self.spectral_shift,
            seed: self.fx_seed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CurveArg {
    Linear,
    Exponential,
    Logarithmic,
    SCurve,
}

impl From<CurveArg> for MorphCurve {
    fn from(arg: CurveArg) -> Self {
        match arg {
            CurveArg::Linear => MorphCurve::Linear,
            CurveArg::Exponential => MorphCurve::Exponential,
            CurveArg::Logarithmic => MorphCurve::Logarithmic,
            CurveArg::SCurve => MorphCurve::SCurve,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Wt,
    Wav,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Wt => OutputFormat::Wt,
            FormatArg::Wav => OutputFormat::Wav,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DistortionArg {
    None,
    Soft,
    Hard,
    Asymmetric,
}

impl From<DistortionArg> for DistortionKind {
    fn from(arg: DistortionArg) -> Self {
        match arg {
            DistortionArg::None => DistortionKind::None,
            DistortionArg::Soft => DistortionKind::Soft,
            DistortionArg::Hard => DistortionKind::Hard,
            DistortionArg::Asymmetric => DistortionKind::Asymmetric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    Correlation,
    Spectral,
}

impl From<MethodArg> for MatchMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Correlation => MatchMethod::Correlation,
            MethodArg::Spectral => MatchMethod::Spectral,
        }
    }
}

impl GenerateArgs {
    /// Builds the request described by the flags.
    fn to_request(&self) -> GenerationRequest {
        let morph = self.morph || !self.end.is_empty();
        GenerationRequest {
            start: frame_from(&self.start),
            end: (!self.end.is_empty()).then(|| frame_from(&self.end)),
            morph,
            num_frames: if morph { self.frames } else { 1 },
            curve: self.synth.curve.into(),
            pulse_duty: self.synth.pulse_duty,
            max_harmonics: self.synth.max_harmonics,
            preview: self.synth.preview,
            format: self.synth.format.into(),
            effects: self.effects.to_config(),
            seed: self.seed,
        }
    }
}

impl BatchArgs {
    fn to_config(&self) -> BatchConfig {
        let pool = if self.pool.is_empty() {
            full_pool()
        } else {
            self.pool.clone()
        };
        BatchConfig {
            min_waves: self.min_waves,
            max_waves: self.max_waves,
            format: self.synth.format.into(),
            preview: self.synth.preview,
            effects: self.effects.to_config(),
            curve: self.synth.curve.into(),
            pulse_duty: self.synth.pulse_duty,
            max_harmonics: self.synth.max_harmonics,
            ..BatchConfig::new(self.out_dir.clone(), self.count, pool)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<ExitCode> {
    let request = match &args.recipe {
        Some(path) => commands::generate::load_request(path)?,
        None => args.to_request(),
    };
    let target = OutputTarget {
        output: args.output.clone(),
        out_dir: args.out_dir.clone(),
    };
    commands::generate::run(&request, &target, args.print_request)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Analyze {
            input,
            frame,
            method,
            emit_request,
        } => commands::analyze::run(&input, frame, method.into(), emit_request),
        Commands::Batch(args) => {
            commands::batch::run(&args.to_config(), args.seed, args.max_seconds)
        }
        Commands::Kinds { json } => commands::kinds::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
