// crates/surface-plan-core/src/lib.rs
// ============================================================================
// Module: Surface Plan Core Library
// Description: Public API surface for the surface planning core.
// Purpose: Expose core types, the planner pipeline, and error kinds.
// Dependencies: crate::{core, error, planner}
// ============================================================================

//! ## Overview
//! Surface Plan evolves a client library's callable surface from a
//! machine-readable description of a remote service's operations, while
//! guaranteeing that surfaces compiled against older descriptions stay
//! link-compatible with newer ones. The core is a pure, synchronous
//! computation over immutable history: it synthesizes canonical protocol
//! signatures, plans compatible evolution against the append-only surface
//! registry, statically gates the candidate surface for overload ambiguity,
//! and merges hand-authored overlay signatures under an explicit structural
//! contract.
//!
//! Parsing the raw service description, emitting callables in a target
//! language, and executing requests are external collaborators; this crate
//! only reasons about parameter-list shapes.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod error;
pub mod planner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::*;
pub use error::PlanError;
pub use planner::CallShape;
pub use planner::DispatchStrategy;
pub use planner::EvolutionOptions;
pub use planner::EvolutionPlan;
pub use planner::FormalNames;
pub use planner::OperationState;
pub use planner::PlanOutcome;
pub use planner::PlannedSignature;
pub use planner::PlannedSurface;
pub use planner::RejectionKind;
pub use planner::ReleaseOutcome;
pub use planner::ReleasePlanner;
pub use planner::ReleaseReport;
pub use planner::ReportEntry;
pub use planner::SignatureDisposition;
