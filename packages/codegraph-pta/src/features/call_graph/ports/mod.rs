//! Ports (Interfaces) for call-graph construction
//!
//! Any algorithm that turns a program into a context-insensitive call
//! graph plugs in here; the dataflow framework only depends on this port.

use crate::errors::Result;
use crate::features::call_graph::domain::MethodCallGraph;
use crate::shared::models::Program;

/// Call graph construction algorithm
pub trait CallGraphBuilder {
    /// Algorithm name for logs
    fn name(&self) -> &'static str;

    /// Build the call graph reachable from the program's entry methods
    fn build(&self, program: &Program) -> Result<MethodCallGraph>;
}
