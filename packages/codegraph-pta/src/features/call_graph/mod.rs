//! # Call Graph Module
//!
//! Typed call graphs (static / special / virtual / interface edges) and
//! the class hierarchy analysis builder. The points-to solver builds its
//! context-sensitive call graph with the same [`CallGraph`] structure.
//!
//! ## Usage
//! ```text
//! use codegraph_pta::features::call_graph::{CallGraphBuilder, ChaBuilder};
//!
//! let call_graph = ChaBuilder::new().build(&program)?;
//! for callee in call_graph.callees_of(call_site) { ... }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{CallGraph, Edge, MethodCallGraph};
pub use infrastructure::{dispatch, resolve_callee, resolve_static, ChaBuilder};
pub use ports::CallGraphBuilder;
