//! Oscillator bank: one periodic cycle per [`WaveformKind`].
//!
//! Every recipe is evaluated on the phase grid `t = n / sample_count` and the
//! finished cycle has its mean subtracted. Most kinds are pure per-sample
//! functions of the phase; the chaotic kinds and Karplus-Strong build the
//! whole cycle at once because they carry integration or delay-line state.

mod basic;
mod chaos;
mod fractal;
mod harmonic;
mod inharmonic;
mod modern;
mod modulation;
mod physical;
mod synthesis;
mod vintage;
mod vowel;

pub use basic::poly_blep;

use std::f64::consts::TAU;

use wavecraft_spec::{WaveformKind, DEFAULT_MAX_HARMONICS, DEFAULT_PULSE_DUTY, SAMPLES_PER_CYCLE};

/// Parameters shared by every oscillator recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleParams {
    /// Number of samples in the cycle.
    pub sample_count: usize,
    /// Duty cycle for [`WaveformKind::Pulse`].
    pub pulse_duty: f64,
    /// Harmonic limit for the additive recipes.
    pub max_harmonics: u32,
    /// Seed for the Karplus-Strong excitation.
    pub seed: u32,
}

impl Default for CycleParams {
    fn default() -> Self {
        Self {
            sample_count: SAMPLES_PER_CYCLE,
            pulse_duty: DEFAULT_PULSE_DUTY,
            max_harmonics: DEFAULT_MAX_HARMONICS,
            seed: 0,
        }
    }
}

impl CycleParams {
    /// Default parameters with a custom cycle length.
    pub fn with_sample_count(sample_count: usize) -> Self {
        Self {
            sample_count,
            ..Self::default()
        }
    }
}

/// Generates one DC-free cycle of `kind`.
///
/// A `sample_count` of zero yields an empty cycle.
pub fn generate(kind: WaveformKind, params: &CycleParams) -> Vec<f64> {
    let n = params.sample_count;
    if n == 0 {
        return Vec::new();
    }

    let duty = params.pulse_duty;
    let h = params.max_harmonics;
    let dt = 1.0 / n as f64;

    let mut samples = match kind {
        WaveformKind::Sine => per_sample(n, basic::sine),
        WaveformKind::Square => per_sample(n, |t| basic::square(t, dt)),
        WaveformKind::Triangle => per_sample(n, |t| basic::triangle(t, dt)),
        WaveformKind::Saw => per_sample(n, |t| basic::saw(t, dt)),
        WaveformKind::ReverseSaw => per_sample(n, |t| basic::reverse_saw(t, dt)),
        WaveformKind::Pulse => per_sample(n, |t| basic::pulse(t, dt, duty)),

        WaveformKind::Lorenz => chaos::lorenz(n),
        WaveformKind::Rossler => chaos::rossler(n),
        WaveformKind::Henon => chaos::henon(n),
        WaveformKind::Duffing => chaos::duffing(n),
        WaveformKind::Chua => chaos::chua(n),
        WaveformKind::LogisticChaos => chaos::logistic_map(n),

        WaveformKind::Weierstrass => per_sample(n, fractal::weierstrass),
        WaveformKind::Cantor => per_sample(n, fractal::cantor),
        WaveformKind::Koch => per_sample(n, fractal::koch),
        WaveformKind::Mandelbrot => per_sample(n, fractal::mandelbrot),

        WaveformKind::OddHarmonics => per_sample(n, |t| harmonic::odd(t, h)),
        WaveformKind::EvenHarmonics => per_sample(n, |t| harmonic::even(t, h)),
        WaveformKind::HarmonicSeries | WaveformKind::Additive => {
            per_sample(n, |t| harmonic::series(t, h))
        }
        WaveformKind::SubHarmonics => per_sample(n, harmonic::sub_harmonics),
        WaveformKind::Formant => per_sample(n, harmonic::formant),

        WaveformKind::StretchedHarm => per_sample(n, |t| inharmonic::warped(t, h, 1.05)),
        WaveformKind::CompressedHarm => per_sample(n, |t| inharmonic::warped(t, h, 0.95)),
        WaveformKind::Metallic => per_sample(n, inharmonic::metallic),
        WaveformKind::Clangorous => per_sample(n, inharmonic::clangorous),
        WaveformKind::KarplusStrong => inharmonic::karplus_strong(n, params.seed),
        WaveformKind::StiffString => per_sample(n, |t| inharmonic::stiff_string(t, h)),

        WaveformKind::Supersaw => per_sample(n, |t| modern::supersaw(t, dt)),
        WaveformKind::PwmSaw => per_sample(n, |t| basic::pulse(t, dt, 0.25)),
        WaveformKind::Parabolic => per_sample(n, modern::parabolic),
        WaveformKind::DoubleSine => per_sample(n, modern::double_sine),
        WaveformKind::HalfSine => per_sample(n, modern::half_sine),
        WaveformKind::Trapezoid => per_sample(n, |t| modern::trapezoid(t, dt)),
        WaveformKind::Power => per_sample(n, modern::power),
        WaveformKind::Exponential => per_sample(n, modern::exponential),
        WaveformKind::Logistic => per_sample(n, modern::logistic),
        WaveformKind::Stepped => per_sample(n, modern::stepped),
        WaveformKind::Noise => per_sample(n, |t| modern::noise(t, h)),
        WaveformKind::Procedural => per_sample(n, modern::procedural),
        WaveformKind::Sinc => per_sample(n, modern::sinc),

        WaveformKind::RingMod => per_sample(n, modulation::ring),
        WaveformKind::AmplitudeMod => per_sample(n, modulation::amplitude),
        WaveformKind::FrequencyMod => per_sample(n, modulation::frequency),
        WaveformKind::CrossMod => per_sample(n, modulation::cross),
        WaveformKind::PhaseMod => per_sample(n, modulation::phase),

        WaveformKind::String => per_sample(n, |t| physical::string(t, h)),
        WaveformKind::Brass => per_sample(n, |t| physical::brass(t, h)),
        WaveformKind::Reed => per_sample(n, physical::reed),
        WaveformKind::Vocal => per_sample(n, physical::vocal),
        WaveformKind::Bell => per_sample(n, physical::bell),

        WaveformKind::SimpleFm => per_sample(n, synthesis::simple_fm),
        WaveformKind::ComplexFm => per_sample(n, synthesis::complex_fm),
        WaveformKind::PhaseDistortion => per_sample(n, synthesis::phase_distortion),
        WaveformKind::Wavefold => per_sample(n, synthesis::wavefold),
        WaveformKind::HardSync => per_sample(n, |t| synthesis::hard_sync(t, dt)),
        WaveformKind::Chebyshev => per_sample(n, synthesis::chebyshev),

        WaveformKind::ArpOdyssey => per_sample(n, |t| vintage::arp_odyssey(t, dt)),
        WaveformKind::Cs80 => per_sample(n, |t| vintage::cs80(t, dt)),
        WaveformKind::Juno => per_sample(n, |t| vintage::juno(t, dt)),
        WaveformKind::MiniMoog => per_sample(n, |t| vintage::minimoog(t, dt)),
        WaveformKind::Ms20 => per_sample(n, |t| vintage::ms20(t, dt)),
        WaveformKind::Oberheim => per_sample(n, |t| vintage::oberheim(t, dt)),
        WaveformKind::Ppg => per_sample(n, vintage::ppg),
        WaveformKind::Prophet5 => per_sample(n, |t| vintage::prophet5(t, dt)),
        WaveformKind::Tb303 => per_sample(n, |t| vintage::tb303(t, dt)),

        WaveformKind::VowelA => per_sample(n, |t| vowel::formant(t, &vowel::A)),
        WaveformKind::VowelE => per_sample(n, |t| vowel::formant(t, &vowel::E)),
        WaveformKind::VowelI => per_sample(n, |t| vowel::formant(t, &vowel::I)),
        WaveformKind::VowelO => per_sample(n, |t| vowel::formant(t, &vowel::O)),
        WaveformKind::VowelU => per_sample(n, |t| vowel::formant(t, &vowel::U)),
        WaveformKind::Diphthong => per_sample(n, vowel::diphthong),
    };

    remove_dc(&mut samples);
    samples
}

/// Generates one cycle with explicit parameters and a zero seed.
pub fn generate_cycle(
    kind: WaveformKind,
    sample_count: usize,
    pulse_duty: f64,
    max_harmonics: u32,
) -> Vec<f64> {
    generate(
        kind,
        &CycleParams {
            sample_count,
            pulse_duty,
            max_harmonics,
            seed: 0,
        },
    )
}

/// Subtracts the arithmetic mean from every sample.
pub fn remove_dc(samples: &mut [f64]) {
    if samples.is_empty() {
        return;
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    for s in samples.iter_mut() {
        *s -= mean;
    }
}

fn per_sample(n: usize, f: impl Fn(f64) -> f64) -> Vec<f64> {
    (0..n).map(|i| f(i as f64 / n as f64)).collect()
}

/// `sin(2*pi*ratio*t)`.
#[inline]
pub(crate) fn partial(ratio: f64, t: f64) -> f64 {
    (TAU * ratio * t).sin()
}
