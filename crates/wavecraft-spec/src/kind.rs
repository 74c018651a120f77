//! The closed catalogue of oscillator recipes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Family a [`WaveformKind`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveformFamily {
    /// Band-limited classic shapes.
    Basic,
    /// Projections of chaotic systems.
    Chaos,
    /// Fractal constructions.
    Fractal,
    /// Integer harmonic series.
    Harmonic,
    /// Stretched, metallic and plucked partials.
    Inharmonic,
    /// Modern and mathematical shapes.
    Modern,
    /// Ring, amplitude, frequency and phase modulation.
    Modulation,
    /// Physical instrument approximations.
    Physical,
    /// FM, phase distortion, folding and waveshaping.
    Synthesis,
    /// Vintage analog emulations.
    Vintage,
    /// Vowel formant approximations.
    Vowel,
}

impl WaveformFamily {
    /// Human-readable family name.
    pub fn name(&self) -> &'static str {
        match self {
            WaveformFamily::Basic => "Basic",
            WaveformFamily::Chaos => "Chaos",
            WaveformFamily::Fractal => "Fractal",
            WaveformFamily::Harmonic => "Harmonic",
            WaveformFamily::Inharmonic => "Inharmonic",
            WaveformFamily::Modern => "Modern",
            WaveformFamily::Modulation => "Modulation",
            WaveformFamily::Physical => "Physical",
            WaveformFamily::Synthesis => "Synthesis",
            WaveformFamily::Vintage => "Vintage",
            WaveformFamily::Vowel => "Vowel",
        }
    }
}

/// Identifier of one oscillator recipe.
///
/// Serialized as its display name (`"Sine"`, `"PhaseDist"`, ...). Parsing is
/// case-insensitive and ignores `_`, `-` and spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum WaveformKind {
    // Basic
    Sine,
    Square,
    Triangle,
    Saw,
    ReverseSaw,
    Pulse,
    // Chaos
    Lorenz,
    Rossler,
    Henon,
    Duffing,
    Chua,
    LogisticChaos,
    // Fractal
    Weierstrass,
    Cantor,
    Koch,
    Mandelbrot,
    // Harmonic
    OddHarmonics,
    EvenHarmonics,
    HarmonicSeries,
    SubHarmonics,
    Formant,
    Additive,
    // Inharmonic
    StretchedHarm,
    CompressedHarm,
    Metallic,
    Clangorous,
    KarplusStrong,
    StiffString,
    // Modern
    Supersaw,
    PwmSaw,
    Parabolic,
    DoubleSine,
    HalfSine,
    Trapezoid,
    Power,
    Exponential,
    Logistic,
    Stepped,
    Noise,
    Procedural,
    Sinc,
    // Modulation
    RingMod,
    AmplitudeMod,
    FrequencyMod,
    CrossMod,
    PhaseMod,
    // Physical
    String,
    Brass,
    Reed,
    Vocal,
    Bell,
    // Synthesis
    SimpleFm,
    ComplexFm,
    PhaseDistortion,
    Wavefold,
    HardSync,
    Chebyshev,
    // Vintage
    ArpOdyssey,
    Cs80,
    Juno,
    MiniMoog,
    Ms20,
    Oberheim,
    Ppg,
    Prophet5,
    Tb303,
    // Vowel
    VowelA,
    VowelE,
    VowelI,
    VowelO,
    VowelU,
    Diphthong,
}

impl WaveformKind {
    /// Every kind in catalogue order.
    pub const ALL: [WaveformKind; 72] = [
        WaveformKind::Sine,
        WaveformKind::Square,
        WaveformKind::Triangle,
        WaveformKind::Saw,
        WaveformKind::ReverseSaw,
        WaveformKind::Pulse,
        WaveformKind::Lorenz,
        WaveformKind::Rossler,
        WaveformKind::Henon,
        WaveformKind::Duffing,
        WaveformKind::Chua,
        WaveformKind::LogisticChaos,
        WaveformKind::Weierstrass,
        WaveformKind::Cantor,
        WaveformKind::Koch,
        WaveformKind::Mandelbrot,
        WaveformKind::OddHarmonics,
        WaveformKind::EvenHarmonics,
        WaveformKind::HarmonicSeries,
        WaveformKind::SubHarmonics,
        WaveformKind::Formant,
        WaveformKind::Additive,
        WaveformKind::StretchedHarm,
        WaveformKind::CompressedHarm,
        WaveformKind::Metallic,
        WaveformKind::Clangorous,
        WaveformKind::KarplusStrong,
        WaveformKind::StiffString,
        WaveformKind::Supersaw,
        WaveformKind::PwmSaw,
        WaveformKind::Parabolic,
        WaveformKind::DoubleSine,
        WaveformKind::HalfSine,
        WaveformKind::Trapezoid,
        WaveformKind::Power,
        WaveformKind::Exponential,
        WaveformKind::Logistic,
        WaveformKind::Stepped,
        WaveformKind::Noise,
        WaveformKind::Procedural,
        WaveformKind::Sinc,
        WaveformKind::RingMod,
        WaveformKind::AmplitudeMod,
        WaveformKind::FrequencyMod,
        WaveformKind::CrossMod,
        WaveformKind::PhaseMod,
        WaveformKind::String,
        WaveformKind::Brass,
        WaveformKind::Reed,
        WaveformKind::Vocal,
        WaveformKind::Bell,
        WaveformKind::SimpleFm,
        WaveformKind::ComplexFm,
        WaveformKind::PhaseDistortion,
        WaveformKind::Wavefold,
        WaveformKind::HardSync,
        WaveformKind::Chebyshev,
        WaveformKind::ArpOdyssey,
        WaveformKind::Cs80,
        WaveformKind::Juno,
        WaveformKind::MiniMoog,
        WaveformKind::Ms20,
        WaveformKind::Oberheim,
        WaveformKind::Ppg,
        WaveformKind::Prophet5,
        WaveformKind::Tb303,
        WaveformKind::VowelA,
        WaveformKind::VowelE,
        WaveformKind::VowelI,
        WaveformKind::VowelO,
        WaveformKind::VowelU,
        WaveformKind::Diphthong,
    ];

    /// Kinds the waveform matcher compares an unknown cycle against.
    ///
    /// Chaotic, fractal, vintage and vowel kinds are left out: their
    /// references are either expensive or too close to other entries to
    /// produce a stable ranking.
    pub const ANALYSIS_CANDIDATES: [WaveformKind; 35] = [
        WaveformKind::Sine,
        WaveformKind::Square,
        WaveformKind::Triangle,
        WaveformKind::Saw,
        WaveformKind::ReverseSaw,
        WaveformKind::Pulse,
        WaveformKind::OddHarmonics,
        WaveformKind::EvenHarmonics,
        WaveformKind::HarmonicSeries,
        WaveformKind::SubHarmonics,
        WaveformKind::Formant,
        WaveformKind::Additive,
        WaveformKind::SimpleFm,
        WaveformKind::ComplexFm,
        WaveformKind::PhaseDistortion,
        WaveformKind::Wavefold,
        WaveformKind::HardSync,
        WaveformKind::Chebyshev,
        WaveformKind::String,
        WaveformKind::Brass,
        WaveformKind::Reed,
        WaveformKind::Vocal,
        WaveformKind::Bell,
        WaveformKind::Supersaw,
        WaveformKind::PwmSaw,
        WaveformKind::Parabolic,
        WaveformKind::DoubleSine,
        WaveformKind::HalfSine,
        WaveformKind::Trapezoid,
        WaveformKind::Power,
        WaveformKind::Exponential,
        WaveformKind::Logistic,
        WaveformKind::Stepped,
        WaveformKind::Noise,
        WaveformKind::Procedural,
    ];

    /// Display name, also used in generated file names.
    pub fn name(&self) -> &'static str {
        match self {
            WaveformKind::Sine => "Sine",
            WaveformKind::Square => "Square",
            WaveformKind::Triangle => "Triangle",
            WaveformKind::Saw => "Saw",
            WaveformKind::ReverseSaw => "ReverseSaw",
            WaveformKind::Pulse => "Pulse",
            WaveformKind::Lorenz => "Lorenz",
            WaveformKind::Rossler => "Rossler",
            WaveformKind::Henon => "Henon",
            WaveformKind::Duffing => "Duffing",
            WaveformKind::Chua => "Chua",
            WaveformKind::LogisticChaos => "LogisticChaos",
            WaveformKind::Weierstrass => "Weierstrass",
            WaveformKind::Cantor => "Cantor",
            WaveformKind::Koch => "Koch",
            WaveformKind::Mandelbrot => "Mandelbrot",
            WaveformKind::OddHarmonics => "OddHarmonics",
            WaveformKind::EvenHarmonics => "EvenHarmonics",
            WaveformKind::HarmonicSeries => "HarmonicSeries",
            WaveformKind::SubHarmonics => "SubHarmonics",
            WaveformKind::Formant => "Formant",
            WaveformKind::Additive => "Additive",
            WaveformKind::StretchedHarm => "StretchedHarm",
            WaveformKind::CompressedHarm => "CompressedHarm",
            WaveformKind::Metallic => "Metallic",
            WaveformKind::Clangorous => "Clangorous",
            WaveformKind::KarplusStrong => "KarplusStrong",
            WaveformKind::StiffString => "StiffString",
            WaveformKind::Supersaw => "Supersaw",
            WaveformKind::PwmSaw => "PWMSaw",
            WaveformKind::Parabolic => "Parabolic",
            WaveformKind::DoubleSine => "DoubleSine",
            WaveformKind::HalfSine => "HalfSine",
            WaveformKind::Trapezoid => "Trapezoid",
            WaveformKind::Power => "Power",
            WaveformKind::Exponential => "Exponential",
            WaveformKind::Logistic => "Logistic",
            WaveformKind::Stepped => "Stepped",
            WaveformKind::Noise => "Noise",
            WaveformKind::Procedural => "Procedural",
            WaveformKind::Sinc => "Sinc",
            WaveformKind::RingMod => "RingMod",
            WaveformKind::AmplitudeMod => "AmplitudeMod",
            WaveformKind::FrequencyMod => "FrequencyMod",
            WaveformKind::CrossMod => "CrossMod",
            WaveformKind::PhaseMod => "PhaseMod",
            WaveformKind::String => "String",
            WaveformKind::Brass => "Brass",
            WaveformKind::Reed => "Reed",
            WaveformKind::Vocal => "Vocal",
            WaveformKind::Bell => "Bell",
            WaveformKind::SimpleFm => "SimpleFM",
            WaveformKind::ComplexFm => "ComplexFM",
            WaveformKind::PhaseDistortion => "PhaseDist",
            WaveformKind::Wavefold => "Wavefold",
            WaveformKind::HardSync => "HardSync",
            WaveformKind::Chebyshev => "Chebyshev",
            WaveformKind::ArpOdyssey => "ARPOdyssey",
            WaveformKind::Cs80 => "CS80",
            WaveformKind::Juno => "Juno",
            WaveformKind::MiniMoog => "MiniMoog",
            WaveformKind::Ms20 => "MS20",
            WaveformKind::Oberheim => "Oberheim",
            WaveformKind::Ppg => "PPG",
            WaveformKind::Prophet5 => "Prophet5",
            WaveformKind::Tb303 => "TB303",
            WaveformKind::VowelA => "VowelA",
            WaveformKind::VowelE => "VowelE",
            WaveformKind::VowelI => "VowelI",
            WaveformKind::VowelO => "VowelO",
            WaveformKind::VowelU => "VowelU",
            WaveformKind::Diphthong => "Diphthong",
        }
    }

    /// Family this kind belongs to.
    pub fn family(&self) -> WaveformFamily {
        use WaveformKind::*;
        match self {
            Sine | Square | Triangle | Saw | ReverseSaw | Pulse => WaveformFamily::Basic,
            Lorenz | Rossler | Henon | Duffing | Chua | LogisticChaos => WaveformFamily::Chaos,
            Weierstrass | Cantor | Koch | Mandelbrot => WaveformFamily::Fractal,
            OddHarmonics | EvenHarmonics | HarmonicSeries | SubHarmonics | Formant | Additive => {
                WaveformFamily::Harmonic
            }
            StretchedHarm | CompressedHarm | Metallic | Clangorous | KarplusStrong
            | StiffString => WaveformFamily::Inharmonic,
            Supersaw | PwmSaw | Parabolic | DoubleSine | HalfSine | Trapezoid | Power
            | Exponential | Logistic | Stepped | Noise | Procedural | Sinc => {
                WaveformFamily::Modern
            }
            RingMod | AmplitudeMod | FrequencyMod | CrossMod | PhaseMod => {
                WaveformFamily::Modulation
            }
            String | Brass | Reed | Vocal | Bell => WaveformFamily::Physical,
            SimpleFm | ComplexFm | PhaseDistortion | Wavefold | HardSync | Chebyshev => {
                WaveformFamily::Synthesis
            }
            ArpOdyssey | Cs80 | Juno | MiniMoog | Ms20 | Oberheim | Ppg | Prophet5 | Tb303 => {
                WaveformFamily::Vintage
            }
            VowelA | VowelE | VowelI | VowelO | VowelU | Diphthong => WaveformFamily::Vowel,
        }
    }

    /// Returns true for kinds whose output depends on a noise seed.
    pub fn is_seeded(&self) -> bool {
        matches!(self, WaveformKind::KarplusStrong)
    }
}

impl fmt::Display for WaveformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known waveform kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWaveformKindError(pub std::string::String);

impl fmt::Display for ParseWaveformKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown waveform kind '{}'", self.0)
    }
}

impl std::error::Error for ParseWaveformKindError {}

fn fold_name(s: &str) -> std::string::String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for WaveformKind {
    type Err = ParseWaveformKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold_name(s);
        if folded == "phasedistortion" {
            return Ok(WaveformKind::PhaseDistortion);
        }
        WaveformKind::ALL
            .iter()
            .copied()
            .find(|kind| fold_name(kind.name()) == folded)
            .ok_or_else(|| ParseWaveformKindError(s.to_string()))
    }
}

impl TryFrom<std::string::String> for WaveformKind {
    type Error = ParseWaveformKindError;

    fn try_from(value: std::string::String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WaveformKind> for &'static str {
    fn from(kind: WaveformKind) -> Self {
        kind.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = WaveformKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), WaveformKind::ALL.len());
    }

    #[test]
    fn test_parse_round_trips_every_name() {
        for kind in WaveformKind::ALL {
            assert_eq!(kind.name().parse::<WaveformKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_parse_is_forgiving() {
        assert_eq!("reverse_saw".parse::<WaveformKind>(), Ok(WaveformKind::ReverseSaw));
        assert_eq!("pwm-saw".parse::<WaveformKind>(), Ok(WaveformKind::PwmSaw));
        assert_eq!("phase_distortion".parse::<WaveformKind>(), Ok(WaveformKind::PhaseDistortion));
        assert_eq!("tb303".parse::<WaveformKind>(), Ok(WaveformKind::Tb303));
        assert!("bogus".parse::<WaveformKind>().is_err());
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&WaveformKind::PhaseDistortion).unwrap();
        assert_eq!(json, "\"PhaseDist\"");
        let kind: WaveformKind = serde_json::from_str("\"arp_odyssey\"").unwrap();
        assert_eq!(kind, WaveformKind::ArpOdyssey);
    }

    #[test]
    fn test_analysis_candidates_skip_chaos() {
        assert!(WaveformKind::ANALYSIS_CANDIDATES
            .iter()
            .all(|k| k.family() != WaveformFamily::Chaos));
        assert!(!WaveformKind::ANALYSIS_CANDIDATES.contains(&WaveformKind::KarplusStrong));
    }

    #[test]
    fn test_family_counts() {
        let count = |family| {
            WaveformKind::ALL
                .iter()
                .filter(|k| k.family() == family)
                .count()
        };
        assert_eq!(count(WaveformFamily::Basic), 6);
        assert_eq!(count(WaveformFamily::Modern), 13);
        assert_eq!(count(WaveformFamily::Vintage), 9);
    }
}
