//! Infrastructure layer for constant propagation
//!
//! - **intra**: client of the per-method [`DataflowSolver`](crate::features::dataflow::DataflowSolver)
//! - **inter**: client of the ICFG [`InterSolver`](crate::features::dataflow::InterSolver)

pub mod inter;
pub mod intra;

pub use inter::InterConstantPropagation;
pub use intra::ConstantPropagation;
