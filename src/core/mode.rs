//! # Conversation Mode
//!
//! The assistant answers either with guiding questions (`Reflection`) or
//! with direct answers (`Answer`). The mode is global: it is sent with every
//! request and decides how the thinking placeholder is colored.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Reflection,
    Answer,
}

impl Mode {
    /// Wire name, as the backend expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Reflection => "reflection",
            Mode::Answer => "answer",
        }
    }

    /// Title-case label for buttons.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Reflection => "Reflection",
            Mode::Answer => "Answer",
        }
    }

    /// One-line explanation shown under the input box.
    pub fn description(self) -> &'static str {
        match self {
            Mode::Reflection => "Reflection mode: Guiding questions to help you think.",
            Mode::Answer => "Answer mode: Direct answers with explanations.",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Reflection => Mode::Answer,
            Mode::Answer => Mode::Reflection,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode string is neither `reflection` nor `answer`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode: {0:?}")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    /// Case-insensitive; the backend is free to echo `"Reflection"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reflection" => Ok(Mode::Reflection),
            "answer" => Ok(Mode::Answer),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}
