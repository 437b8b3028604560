//! Analysis configuration
//!
//! Built from a [`Preset`] and adjusted with builder-style setters or a
//! YAML file:
//!
//! ```yaml
//! version: 1
//! preset: balanced
//! overrides:
//!   pta:
//!     context:
//!       kind: call_site
//!       k: 2
//!     max_iterations: 1000000
//! ```

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, ConfigOverrides, SUPPORTED_VERSIONS};
use super::preset::Preset;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest supported context depth
pub const MAX_CONTEXT_DEPTH: usize = 8;

/// Context-sensitivity policy of the points-to solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextSensitivity {
    Insensitive,
    /// Last `k` call sites
    CallSite { k: usize },
    /// Last `k` receiver objects
    Object { k: usize },
    /// Last `k` classes containing receiver allocation sites
    Type { k: usize },
}

impl ContextSensitivity {
    /// Context bound; 0 when insensitive
    pub fn depth(&self) -> usize {
        match self {
            Self::Insensitive => 0,
            Self::CallSite { k } | Self::Object { k } | Self::Type { k } => *k,
        }
    }

    /// The `kind` tag used in YAML
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insensitive => "insensitive",
            Self::CallSite { .. } => "call_site",
            Self::Object { .. } => "object",
            Self::Type { .. } => "type",
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let k = self.depth();
        match self {
            Self::Insensitive => Ok(()),
            _ if k == 0 || k > MAX_CONTEXT_DEPTH => Err(ConfigError::Range {
                kind: self.kind(),
                k,
                max: MAX_CONTEXT_DEPTH,
            }),
            _ => Ok(()),
        }
    }
}

/// Call graph construction algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallGraphAlgorithm {
    /// Class hierarchy analysis
    Cha,
    /// On-the-fly construction by the points-to solver
    Pta,
}

/// Points-to solver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PtaConfig {
    pub context: ContextSensitivity,

    /// Max worklist entries processed (None=unlimited)
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

impl PtaConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            context: preset.context(),
            max_iterations: None,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.context.validate()?;
        if self.max_iterations == Some(0) {
            return Err(ConfigError::ZeroIterationBound {
                field: "pta.max_iterations",
            });
        }
        Ok(())
    }

    /// Builder: Set context sensitivity
    pub fn with_context(mut self, v: ContextSensitivity) -> Self {
        self.context = v;
        self
    }

    /// Builder: Set max_iterations
    pub fn with_max_iterations(mut self, v: Option<usize>) -> Self {
        self.max_iterations = v;
        self
    }
}

impl Default for PtaConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

/// Dataflow solver settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataflowConfig {
    /// Max node visits (None=unlimited)
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

impl DataflowConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_iterations == Some(0) {
            return Err(ConfigError::ZeroIterationBound {
                field: "dataflow.max_iterations",
            });
        }
        Ok(())
    }

    /// Builder: Set max_iterations
    pub fn with_max_iterations(mut self, v: Option<usize>) -> Self {
        self.max_iterations = v;
        self
    }
}

/// Complete configuration of a whole-program run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub preset: Preset,
    pub call_graph: CallGraphAlgorithm,
    pub pta: PtaConfig,
    pub dataflow: DataflowConfig,
}

impl AnalysisConfig {
    /// Start from a preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            call_graph: preset.call_graph(),
            pta: PtaConfig::from_preset(preset),
            dataflow: DataflowConfig::default(),
        }
    }

    /// Builder: Set call graph algorithm
    pub fn call_graph(mut self, v: CallGraphAlgorithm) -> Self {
        self.call_graph = v;
        self
    }

    /// Builder: Adjust points-to settings
    pub fn pta(mut self, f: impl FnOnce(PtaConfig) -> PtaConfig) -> Self {
        self.pta = f(self.pta);
        self
    }

    /// Builder: Adjust dataflow settings
    pub fn dataflow(mut self, f: impl FnOnce(DataflowConfig) -> DataflowConfig) -> Self {
        self.dataflow = f(self.dataflow);
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.pta.validate()?;
        self.dataflow.validate()
    }

    /// Parse a v1 YAML document and validate the result
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        // Version check
        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset: Preset = export.preset.parse()?;
        let mut config = Self::preset(preset);

        if let Some(overrides) = export.overrides {
            if let Some(call_graph) = overrides.call_graph {
                config.call_graph = call_graph;
            }
            if let Some(pta) = overrides.pta {
                config.pta = pta;
            }
            if let Some(dataflow) = overrides.dataflow {
                config.dataflow = dataflow;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Export as a v1 YAML document; overrides are always written in full
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.preset.to_string(),
            overrides: Some(ConfigOverrides {
                call_graph: Some(self.call_graph),
                pta: Some(self.pta.clone()),
                dataflow: Some(self.dataflow.clone()),
            }),
        };

        Ok(serde_yaml::to_string(&export)?)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}
