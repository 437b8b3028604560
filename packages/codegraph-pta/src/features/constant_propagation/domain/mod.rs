//! Constant propagation domain: lattice, facts, expression evaluation

pub mod evaluate;
pub mod fact;
pub mod value;

pub use evaluate::{evaluate, evaluate_binary};
pub use fact::CpFact;
pub use value::Value;
