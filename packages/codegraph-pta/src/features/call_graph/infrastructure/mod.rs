//! Infrastructure layer for call graphs
//!
//! - **dispatch**: method lookup against a single class
//! - **cha_builder**: class hierarchy analysis over the subtype lattice

pub mod cha_builder;
pub mod dispatch;

pub use cha_builder::ChaBuilder;
pub use dispatch::{dispatch, resolve_callee, resolve_static};
