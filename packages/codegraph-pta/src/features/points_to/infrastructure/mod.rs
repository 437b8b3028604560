//! Infrastructure layer for Points-to Analysis
//!
//! - **context_selector**: insensitive / k-call-site / k-object / k-type policies
//! - **cs_manager**: interning tables for context-sensitive elements
//! - **pointer_flow_graph**: monotone propagation graph (petgraph `DiGraphMap`)
//! - **worklist**: FIFO queue with pending-set merging
//! - **solver**: on-the-fly call graph + points-to fixpoint

pub mod context_selector;
pub mod cs_manager;
pub mod pointer_flow_graph;
pub mod solver;
pub mod worklist;

pub use context_selector::{
    selector_for, ContextInsensitiveSelector, KCallSiteSelector, KObjectSelector, KTypeSelector,
};
pub use cs_manager::CsManager;
pub use pointer_flow_graph::PointerFlowGraph;
pub use solver::{CsCallGraph, PointsToSolver, PtaStats};
pub use worklist::PtaWorklist;
