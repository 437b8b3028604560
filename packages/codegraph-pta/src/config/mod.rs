//! Configuration System
//!
//! Two tiers:
//! - Level 1: Preset - one-liner (`fast`, `balanced`, `thorough`)
//! - Level 2: Overrides - builder closures or a versioned YAML document
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_pta::config::{AnalysisConfig, ContextSensitivity, Preset};
//!
//! // Level 1
//! let config = AnalysisConfig::preset(Preset::Fast);
//!
//! // Level 2
//! let config = AnalysisConfig::preset(Preset::Balanced)
//!     .pta(|c| c.with_context(ContextSensitivity::CallSite { k: 2 }));
//! let config = AnalysisConfig::from_yaml_file("analysis.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod io;
pub mod preset;

// Re-exports
pub use analysis_config::{
    AnalysisConfig, CallGraphAlgorithm, ContextSensitivity, DataflowConfig, PtaConfig,
    MAX_CONTEXT_DEPTH,
};
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use preset::Preset;
