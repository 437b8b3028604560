//! Application layer: end-to-end orchestration over the feature slices

pub mod whole_program;

pub use whole_program::{AnalysisReport, WholeProgramAnalyzer, WholeProgramResult};
