//! Utility modules shared across features
//!
//! - `interner`: get-or-create tables mapping structural keys to dense handles

pub mod interner;

pub use interner::{Idx, Interner};
