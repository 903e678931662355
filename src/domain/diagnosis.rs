//! Prediction outcome types.
//!
//! The classifier emits a raw label; only `0` and `1` have a presentation.

use super::features::FeatureVector;

/// Binary risk verdict shown on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Label 0: heart disease likely
    AtRisk,
    /// Label 1: heart disease unlikely
    Clear,
}

impl Verdict {
    /// Interpret a raw classifier label. Any label other than 0 or 1 has no verdict.
    #[must_use]
    pub fn from_label(label: usize) -> Option<Self> {
        match label {
            0 => Some(Self::AtRisk),
            1 => Some(Self::Clear),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> usize {
        match self {
            Self::AtRisk => 0,
            Self::Clear => 1,
        }
    }

    /// Headline for the result screen.
    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            Self::Clear => "You're CLEAR!",
            Self::AtRisk => "You're AT RISK!",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Clear => "Heart disease unlikely for the entered measurements",
            Self::AtRisk => "Possible heart disease - consultation advised",
        }
    }

    /// Associated color for TUI display (RGB).
    #[must_use]
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Self::Clear => (16, 185, 129),  // Emerald (#10B981)
            Self::AtRisk => (244, 63, 94), // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clear => write!(f, "CLEAR"),
            Self::AtRisk => write!(f, "AT RISK"),
        }
    }
}

/// One completed prediction, as held by the result screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub verdict: Verdict,

    /// Features the classifier saw
    pub features: FeatureVector,

    pub assessed_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    #[must_use]
    pub fn new(verdict: Verdict, features: FeatureVector) -> Self {
        Self {
            verdict,
            features,
            assessed_at: chrono::Utc::now(),
        }
    }
}
