//! Domain models for call graphs

pub mod call_graph;

pub use call_graph::{CallGraph, Edge};

use crate::shared::models::{MethodId, StmtId};

/// Context-insensitive call graph over program statements and methods
pub type MethodCallGraph = CallGraph<StmtId, MethodId>;
