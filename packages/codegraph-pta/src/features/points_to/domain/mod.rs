//! Domain models for Points-to Analysis
//!
//! Core abstractions independent of the solving algorithm:
//! - Context: k-limited call/heap context values
//! - HeapModel: allocation-site abstraction of heap objects
//! - Pointer / CsObj / CsMethod / CsCallSite: context-sensitive element keys
//! - PointsToSet: growth-only sets of context-sensitive objects

pub mod context;
pub mod cs_elements;
pub mod heap;
pub mod points_to_set;

pub use context::{Context, ContextElement};
pub use cs_elements::{
    ContextId, CsCallSite, CsCallSiteId, CsMethod, CsMethodId, CsObj, CsObjId, Pointer, PointerId,
};
pub use heap::{HeapModel, Obj, ObjId};
pub use points_to_set::PointsToSet;
