//! # Constant Propagation Module
//!
//! Integer constant propagation as a dataflow client:
//! - **Lattice**: UNDEF ⊐ constants ⊐ NAC per variable
//! - **Intraprocedural**: calls yield NAC results
//! - **Interprocedural**: arguments and return values flow along ICFG
//!   call and return edges
//!
//! Only variables of int-like types (boolean, byte, char, short, int) are
//! tracked.
//!
//! ## Usage
//! ```text
//! use codegraph_pta::features::constant_propagation::{ConstantPropagationAnalyzer, Value};
//!
//! let result = ConstantPropagationAnalyzer::default().analyze_method(&program, method)?;
//! assert_eq!(result.out_fact(CfgNode::Stmt(stmt)).get(z), Value::Constant(3));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::ConstantPropagationAnalyzer;
pub use domain::{evaluate, evaluate_binary, CpFact, Value};
pub use infrastructure::{ConstantPropagation, InterConstantPropagation};
