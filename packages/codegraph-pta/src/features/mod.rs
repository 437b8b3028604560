//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure analysis data structures
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - Solver and builder implementations

// Call graphs: typed edges, dispatch, CHA
pub mod call_graph;

// Context-sensitive points-to analysis with on-the-fly call graph
pub mod points_to;

// CFG / ICFG and worklist solvers
pub mod dataflow;

// Integer constant propagation client
pub mod constant_propagation;
