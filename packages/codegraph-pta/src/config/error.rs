//! Errors raised while loading or validating an [`AnalysisConfig`]
//!
//! [`AnalysisConfig`]: super::AnalysisConfig

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `pta.context.k` outside `1..=MAX_CONTEXT_DEPTH` for a sensitive policy
    #[error(
        "pta.context.k = {k} is out of range for {kind} contexts (expected 1..={max}); \
         set `kind: insensitive` instead of k = 0"
    )]
    Range {
        kind: &'static str,
        k: usize,
        max: usize,
    },

    /// `max_iterations` of zero; omit the key for an unbounded solver
    #[error("{field} is 0; give a positive bound or leave it unset")]
    ZeroIterationBound { field: &'static str },

    #[error("config file has no `version` key (expected `version: 1`)")]
    MissingVersion,

    #[error("config version {found} cannot be read; this build reads {supported:?}")]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Preset name other than `fast`, `balanced` or `thorough`
    #[error("no preset named '{0}' (choose fast, balanced or thorough)")]
    UnknownPreset(String),

    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
