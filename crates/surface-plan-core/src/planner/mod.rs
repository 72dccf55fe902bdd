// crates/surface-plan-core/src/planner/mod.rs
// ============================================================================
// Module: Surface Planner
// Description: Synthesis, evolution, ambiguity, and release orchestration.
// Purpose: Implement the planning pipeline over the core types.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Planner modules implement the one-way planning pipeline: operation model
//! in, canonical signature out of the synthesizer, evolution cases over the
//! registry history, the ambiguity gate over the candidate surface (overlay
//! rule consulted first), and the release pass that reports per operation.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod ambiguity;
pub mod evolution;
pub mod overlay;
pub mod report;
pub mod surface;
pub mod synthesize;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use ambiguity::CallShape;
pub use ambiguity::accepted_shapes;
pub use ambiguity::analyze_candidates;
pub use ambiguity::canonical_candidates;
pub use evolution::DispatchStrategy;
pub use evolution::EvolutionOptions;
pub use evolution::EvolutionPlan;
pub use evolution::PlanOutcome;
pub use evolution::apply_plan;
pub use evolution::plan_operation;
pub use overlay::validate_overlay;
pub use overlay::validate_overlays;
pub use report::OperationState;
pub use report::RejectionKind;
pub use report::ReleaseOutcome;
pub use report::ReleasePlanner;
pub use report::ReleaseReport;
pub use report::ReportEntry;
pub use surface::PlannedSignature;
pub use surface::PlannedSurface;
pub use surface::SignatureDisposition;
pub use surface::planned_surface;
pub use synthesize::FormalNames;
pub use synthesize::collapse_formals;
pub use synthesize::synthesize_formals;
pub use synthesize::synthesize_generation_zero;
