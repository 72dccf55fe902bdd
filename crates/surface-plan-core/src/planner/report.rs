// crates/surface-plan-core/src/planner/report.rs
// ============================================================================
// Module: Release Planning Pass
// Description: Per-release orchestration of planning, checks, and reporting.
// Purpose: Produce the operator-facing planning report and accepted plans.
// Dependencies: crate::core, crate::planner
// ============================================================================

//! ## Overview
//! A release planning pass runs once per release over the full operation
//! stream: per operation it validates overlays, plans the evolution against
//! the registry history, gates the resulting candidate set through the
//! ambiguity analyzer, and records one report entry. Errors are terminal for
//! the operation they concern and never abort the rest of the pass; nothing
//! is silently swallowed or auto-corrected without a report entry.
//!
//! Planning never mutates the registry. [`ReleasePlanner::commit`] appends
//! the accepted proposals afterwards, under the registry's single-writer
//! discipline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::operation::Operation;
use crate::core::operation::OperationName;
use crate::core::registry::RegistryError;
use crate::core::registry::SurfaceRegistry;
use crate::core::signature::Signature;
use crate::error::PlanError;
use crate::planner::ambiguity::analyze_candidates;
use crate::planner::evolution::DispatchStrategy;
use crate::planner::evolution::EvolutionOptions;
use crate::planner::evolution::EvolutionPlan;
use crate::planner::evolution::PlanOutcome;
use crate::planner::evolution::plan_operation;
use crate::planner::overlay::validate_overlays;

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Error kind attached to a rejected report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// Upstream model invariant violation.
    MalformedOperation,
    /// Shape change requiring a human-designed migration.
    IncompatibleOperationChange,
    /// Candidate signatures simultaneously satisfiable.
    AmbiguousOverloadSet,
    /// Overlay merge rule violation.
    OverlayContractViolation,
}

impl From<&PlanError> for RejectionKind {
    fn from(error: &PlanError) -> Self {
        match error {
            PlanError::MalformedOperation { .. } => Self::MalformedOperation,
            PlanError::IncompatibleOperationChange { .. } => Self::IncompatibleOperationChange,
            PlanError::AmbiguousOverloadSet { .. } => Self::AmbiguousOverloadSet,
            PlanError::OverlayContractViolation { .. } => Self::OverlayContractViolation,
        }
    }
}

/// Outcome recorded for one operation in the planning report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OperationState {
    /// The surface already covers the new description.
    Unchanged,
    /// New signatures extend the surface.
    Extended,
    /// The primary collapsed its optional parameters into a property bag.
    BagCollapsed,
    /// The operation was rejected; its registry history is untouched.
    Rejected {
        /// Error classification.
        kind: RejectionKind,
        /// Human-readable error rendering.
        message: String,
        /// Offending signatures, when the error names any.
        offending: Vec<Signature>,
    },
}

impl From<PlanOutcome> for OperationState {
    fn from(outcome: PlanOutcome) -> Self {
        match outcome {
            PlanOutcome::Unchanged => Self::Unchanged,
            PlanOutcome::Extended => Self::Extended,
            PlanOutcome::BagCollapsed => Self::BagCollapsed,
        }
    }
}

/// One operation's entry in the planning report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Operation the entry concerns.
    pub operation: OperationName,
    /// Recorded outcome.
    pub state: OperationState,
}

/// Operator-facing log of one release planning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseReport {
    /// Entries in operation input order.
    pub entries: Vec<ReportEntry>,
}

impl ReleaseReport {
    /// Returns true when any operation was rejected.
    #[must_use]
    pub fn has_rejections(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry.state, OperationState::Rejected { .. }))
    }
}

/// Result of one planning pass: the report plus the accepted plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseOutcome {
    /// Operator-facing report.
    pub report: ReleaseReport,
    /// Accepted evolution plans, ready to commit.
    pub accepted: Vec<EvolutionPlan>,
}

// ============================================================================
// SECTION: Release Planner
// ============================================================================

/// Orchestrates one release planning pass per operation stream.
#[derive(Debug, Clone, Default)]
pub struct ReleasePlanner {
    /// Planner tunables shared by every operation in the pass.
    options: EvolutionOptions,
}

impl ReleasePlanner {
    /// Creates a planner with the given options.
    #[must_use]
    pub const fn new(options: EvolutionOptions) -> Self {
        Self { options }
    }

    /// Returns the planner options.
    #[must_use]
    pub const fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    /// Plans one release over the operation stream without mutating the
    /// registry. Planning the same inputs twice produces the same outcome.
    #[must_use]
    pub fn plan_release(
        &self,
        registry: &SurfaceRegistry,
        operations: &[Operation],
        overlays: &[Signature],
    ) -> ReleaseOutcome {
        let mut report = ReleaseReport::default();
        let mut accepted = Vec::new();
        for operation in operations {
            let operation_overlays: Vec<&Signature> =
                overlays.iter().filter(|overlay| overlay.operation == operation.name).collect();
            match self.plan_one(registry, operation, &operation_overlays) {
                Ok(plan) => {
                    report.entries.push(ReportEntry {
                        operation: operation.name.clone(),
                        state: plan.outcome.into(),
                    });
                    accepted.push(plan);
                }
                Err(error) => {
                    report.entries.push(ReportEntry {
                        operation: operation.name.clone(),
                        state: OperationState::Rejected {
                            kind: (&error).into(),
                            message: error.to_string(),
                            offending: offending_signatures(&error),
                        },
                    });
                }
            }
        }
        ReleaseOutcome { report, accepted }
    }

    /// Appends every accepted plan's proposals to the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when a proposal does not continue its
    /// operation's history exactly, which indicates the registry changed
    /// between planning and commit.
    pub fn commit(
        &self,
        registry: &mut SurfaceRegistry,
        outcome: &ReleaseOutcome,
    ) -> Result<(), RegistryError> {
        for plan in &outcome.accepted {
            for signature in &plan.proposed {
                registry.append(signature.clone())?;
            }
        }
        Ok(())
    }

    /// Runs the full per-operation pipeline: overlay precondition, evolution
    /// planning, then the ambiguity gate over the candidate set.
    fn plan_one(
        &self,
        registry: &SurfaceRegistry,
        operation: &Operation,
        overlays: &[&Signature],
    ) -> Result<EvolutionPlan, PlanError> {
        let owned_overlays: Vec<Signature> =
            overlays.iter().map(|overlay| (*overlay).clone()).collect();
        validate_overlays(operation, &owned_overlays)?;
        let history = registry.history(&operation.name);
        let plan = plan_operation(history, operation, &self.options)?;
        if self.options.dispatch == DispatchStrategy::Overloads {
            let mut candidates: Vec<Signature> = history.to_vec();
            candidates.extend(plan.proposed.iter().cloned());
            candidates.extend(owned_overlays);
            analyze_candidates(&operation.name, &candidates)?;
        }
        Ok(plan)
    }
}

// ============================================================================
// SECTION: Report Helpers
// ============================================================================

/// Extracts the offending signatures an error names, for the report entry.
fn offending_signatures(error: &PlanError) -> Vec<Signature> {
    match error {
        PlanError::IncompatibleOperationChange { previous, .. } => {
            vec![(**previous).clone()]
        }
        PlanError::AmbiguousOverloadSet { first, second, .. } => {
            vec![(**first).clone(), (**second).clone()]
        }
        PlanError::MalformedOperation { .. } | PlanError::OverlayContractViolation { .. } => {
            Vec::new()
        }
    }
}
