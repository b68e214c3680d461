//! Mode controller
//!
//! Exactly one of three panels is active at a time. Switching is a pure
//! assignment: no panel's data is touched and nothing in flight is cancelled.

use std::fmt;
use std::str::FromStr;

/// Operating mode (one panel each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Curate knowledge-base entries
    #[default]
    Curation,
    /// Send ad-hoc queries to the answer endpoint
    Probe,
    /// Review aggregate usage
    Analytics,
}

impl Mode {
    pub const ORDER: [Mode; 3] = [Mode::Curation, Mode::Probe, Mode::Analytics];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Curation => "Manage FAQs",
            Mode::Probe => "Test Search",
            Mode::Analytics => "Analytics",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Mode::Curation => "faqs",
            Mode::Probe => "test",
            Mode::Analytics => "analytics",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faqs" | "curation" | "1" => Ok(Mode::Curation),
            "test" | "probe" | "search" | "2" => Ok(Mode::Probe),
            "analytics" | "stats" | "3" => Ok(Mode::Analytics),
            other => Err(format!(
                "Unknown mode: {}. Use faqs, test or analytics.",
                other
            )),
        }
    }
}

/// Holds the active mode
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    current: Mode,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    /// Always succeeds, regardless of data state
    pub fn select(&mut self, mode: Mode) {
        self.current = mode;
    }
}
