/*
 * Codegraph PTA - Whole-Program Pointer & Dataflow Analysis
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Program model (classes, methods, statements, hierarchy)
 * - features/    : Vertical slices (points_to → call_graph → dataflow → constant_propagation)
 * - application/ : End-to-end orchestration
 * - config/      : Presets + YAML overrides
 *
 * Analyses:
 * - Context-sensitive points-to with on-the-fly call graph
 * - CHA call graph
 * - Interprocedural dataflow over the ICFG (constant propagation client)
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Builder helpers mirror IR statement shapes
#![allow(clippy::type_complexity)] // Result tables keyed by generic handles
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared program model and utilities
pub mod shared;

/// Feature slices
pub mod features;

/// End-to-end driver
pub mod application;

/// Configuration (presets, YAML)
pub mod config;

/// Error types
pub mod errors;

// Re-exports for the common entry points
pub use application::{AnalysisReport, WholeProgramAnalyzer, WholeProgramResult};
pub use config::{AnalysisConfig, ContextSensitivity, Preset};
pub use errors::{AnalysisError, Result};
pub use features::call_graph::{CallGraphBuilder, ChaBuilder, MethodCallGraph};
pub use features::constant_propagation::{ConstantPropagationAnalyzer, CpFact, Value};
pub use features::dataflow::{Icfg, IcfgNode};
pub use features::points_to::{PointerAnalysis, PointerAnalysisResult};
pub use shared::models::{Program, ProgramBuilder};
