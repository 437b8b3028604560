//! Infrastructure layer for dataflow
//!
//! - **worklist**: FIFO node queue with pending-set deduplication
//! - **solver**: forward solver over one method's CFG
//! - **inter_solver**: forward solver over the ICFG

pub mod inter_solver;
pub mod solver;
pub mod worklist;

pub use inter_solver::InterSolver;
pub use solver::DataflowSolver;
pub use worklist::NodeWorklist;
