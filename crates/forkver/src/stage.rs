//! Development stages

use std::fmt;

/// Stage of software development a version belongs to.
///
/// Variants are ordered by declaration, so `PreAlpha < Alpha < ... < EndOfLife`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DevelopmentStage {
    PreAlpha,
    Alpha,
    Beta,
    ReleaseCandidate,
    #[default]
    Stable,
    EndOfLife,
}

impl DevelopmentStage {
    /// Short code used by the inline build notation (`1.2.0rc5`).
    ///
    /// `PreAlpha` and `Alpha` share `"a"`; `Stable` and `EndOfLife` have none.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            DevelopmentStage::PreAlpha | DevelopmentStage::Alpha => Some("a"),
            DevelopmentStage::Beta => Some("b"),
            DevelopmentStage::ReleaseCandidate => Some("rc"),
            DevelopmentStage::Stable | DevelopmentStage::EndOfLife => None,
        }
    }

    pub fn has_code(&self) -> bool {
        self.code().is_some()
    }

    /// Resolve a short code. `"a"` always yields `Alpha`, never `PreAlpha`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "a" => Some(DevelopmentStage::Alpha),
            "b" => Some(DevelopmentStage::Beta),
            "rc" => Some(DevelopmentStage::ReleaseCandidate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DevelopmentStage::PreAlpha => "pre-alpha",
            DevelopmentStage::Alpha => "alpha",
            DevelopmentStage::Beta => "beta",
            DevelopmentStage::ReleaseCandidate => "rc",
            DevelopmentStage::Stable => "stable",
            DevelopmentStage::EndOfLife => "end-of-life",
        }
    }
}

impl fmt::Display for DevelopmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
