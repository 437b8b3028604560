pub mod analyzer;

pub use analyzer::ConstantPropagationAnalyzer;
