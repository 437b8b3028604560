//! Configuration I/O schema
//!
//! Defines YAML schema types. Loading and export live on
//! [`AnalysisConfig`](super::AnalysisConfig).

use super::analysis_config::{CallGraphAlgorithm, DataflowConfig, PtaConfig};
use serde::{Deserialize, Serialize};

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Base preset
    pub preset: String,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_graph: Option<CallGraphAlgorithm>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pta: Option<PtaConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataflow: Option<DataflowConfig>,
}
