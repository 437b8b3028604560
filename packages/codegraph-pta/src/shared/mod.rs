//! Shared module - Common types and utilities
//!
//! Types shared by every feature slice: the program model and the
//! interning utilities the solvers build their entity tables on.

pub mod models;
pub mod utils;

pub use models::*;
