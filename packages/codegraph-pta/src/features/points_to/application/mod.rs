//! Application layer for Points-to Analysis
//!
//! - **PointerAnalysis**: configured whole-program run
//! - **PointerAnalysisResult**: query interface over the final tables

pub mod analyzer;

pub use analyzer::{PointerAnalysis, PointerAnalysisResult};
