//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use super::analysis_config::{CallGraphAlgorithm, ContextSensitivity};
use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Quick look: CHA call graph
    ///
    /// - Call graph: class hierarchy analysis
    /// - PTA: context insensitive (if run at all)
    Fast,

    /// Default: points-to call graph, 1-object sensitive
    #[default]
    Balanced,

    /// Most precise: points-to call graph, 2-object sensitive
    Thorough,
}

impl Preset {
    pub fn call_graph(&self) -> CallGraphAlgorithm {
        match self {
            Self::Fast => CallGraphAlgorithm::Cha,
            Self::Balanced | Self::Thorough => CallGraphAlgorithm::Pta,
        }
    }

    pub fn context(&self) -> ContextSensitivity {
        match self {
            Self::Fast => ContextSensitivity::Insensitive,
            Self::Balanced => ContextSensitivity::Object { k: 1 },
            Self::Thorough => ContextSensitivity::Object { k: 2 },
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
