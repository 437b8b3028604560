//! # Dataflow Module
//!
//! Monotone dataflow framework over control flow graphs:
//! - **Cfg**: per-method graph with artificial entry/exit nodes
//! - **Icfg**: CFGs of every reachable method joined along a call graph
//! - **Solvers**: forward worklist iteration, intra- and interprocedural
//!
//! Clients implement [`DataflowAnalysis`] or [`InterDataflowAnalysis`];
//! see `features::constant_propagation` for one.
//!
//! ## Academic References
//! - Kildall, G. "A Unified Approach to Global Program Optimization" (POPL 1973)
//! - Sharir, Pnueli "Two Approaches to Interprocedural Data Flow Analysis" (1981)
//!
//! ## Usage
//! ```text
//! use codegraph_pta::features::dataflow::{Icfg, InterSolver};
//!
//! let icfg = Icfg::build(&program, &call_graph);
//! let result = InterSolver::new(&client, &icfg).solve()?;
//! let fact = result.out_fact(IcfgNode::Stmt(stmt));
//! ```

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{Cfg, CfgEdgeKind, CfgNode, DataflowResult, Icfg, IcfgEdge, IcfgNode};
pub use infrastructure::{DataflowSolver, InterSolver};
pub use ports::{DataflowAnalysis, InterDataflowAnalysis};
