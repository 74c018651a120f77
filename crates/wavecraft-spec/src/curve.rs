//! Morph position curves.

use serde::{Deserialize, Serialize};

/// Remaps a linear morph position in [0, 1] before frame weights are built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphCurve {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic ease-in, `t^2`.
    #[serde(alias = "ease_in")]
    Exponential,
    /// Square-root ease-out, `sqrt(t)`.
    #[serde(alias = "ease_out")]
    Logarithmic,
    /// Smoothstep, `t^2 (3 - 2t)`.
    #[serde(alias = "smoothstep")]
    SCurve,
}

impl MorphCurve {
    /// Applies the curve to a position in [0, 1].
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            MorphCurve::Linear => t,
            MorphCurve::Exponential => t * t,
            MorphCurve::Logarithmic => t.sqrt(),
            MorphCurve::SCurve => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Abbreviation used in file name tags; `None` for the linear default.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            MorphCurve::Linear => None,
            MorphCurve::Exponential => Some("Exp"),
            MorphCurve::Logarithmic => Some("Log"),
            MorphCurve::SCurve => Some("S"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [MorphCurve; 4] = [
        MorphCurve::Linear,
        MorphCurve::Exponential,
        MorphCurve::Logarithmic,
        MorphCurve::SCurve,
    ];

    #[test]
    fn test_curves_fix_endpoints() {
        for curve in CURVES {
            assert_eq!(curve.apply(0.0), 0.0, "{:?}", curve);
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-12, "{:?}", curve);
        }
    }

    #[test]
    fn test_curve_shapes_at_midpoint() {
        assert_eq!(MorphCurve::Linear.apply(0.5), 0.5);
        assert_eq!(MorphCurve::Exponential.apply(0.5), 0.25);
        assert!((MorphCurve::Logarithmic.apply(0.25) - 0.5).abs() < 1e-12);
        assert_eq!(MorphCurve::SCurve.apply(0.5), 0.5);
    }

    #[test]
    fn test_aliases() {
        let curve: MorphCurve = serde_json::from_str("\"ease_in\"").unwrap();
        assert_eq!(curve, MorphCurve::Exponential);
        let curve: MorphCurve = serde_json::from_str("\"s_curve\"").unwrap();
        assert_eq!(curve, MorphCurve::SCurve);
    }
}
