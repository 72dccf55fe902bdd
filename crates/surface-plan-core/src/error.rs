// crates/surface-plan-core/src/error.rs
// ============================================================================
// Module: Planning Errors
// Description: Terminal per-operation error kinds for the planning core.
// Purpose: Surface contract violations with the offending data attached.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! All planning errors are terminal for the single operation they concern
//! and never abort planning for other operations. Each variant carries the
//! offending shapes so an operator can act on the report entry without
//! re-running the pass. Whether a release fails outright or proceeds while
//! excluding the offending operation is a policy choice external to this
//! crate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::operation::OperationName;
use crate::core::signature::FormalSeq;
use crate::core::signature::Signature;
use crate::planner::ambiguity::CallShape;

// ============================================================================
// SECTION: Plan Errors
// ============================================================================

/// Terminal planning error for one operation.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The upstream parser handed a model violating its invariants.
    #[error("operation {operation}: malformed operation model: {detail}")]
    MalformedOperation {
        /// Offending operation.
        operation: OperationName,
        /// Violated invariant.
        detail: String,
    },
    /// A required-parameter-shape change that cannot be planned
    /// automatically; requires a human-designed migration.
    #[error(
        "operation {operation}: incompatible operation change: latest generation {previous}, \
         proposed {proposed}"
    )]
    IncompatibleOperationChange {
        /// Offending operation.
        operation: OperationName,
        /// Latest recorded generation.
        previous: Box<Signature>,
        /// Formal sequence the new description would synthesize.
        proposed: FormalSeq,
    },
    /// Two candidate signatures are simultaneously satisfiable by some
    /// argument list and no structural exemption applies.
    #[error(
        "operation {operation}: ambiguous overload set: {first} conflicts with {second} on call \
         shape {call_shape}; {suggestion}"
    )]
    AmbiguousOverloadSet {
        /// Offending operation.
        operation: OperationName,
        /// First conflicting signature.
        first: Box<Signature>,
        /// Second conflicting signature.
        second: Box<Signature>,
        /// Minimal argument shape satisfying both signatures.
        call_shape: CallShape,
        /// Proposed disambiguation parameter change.
        suggestion: String,
    },
    /// An overlay signature violates the overlay merge rule.
    #[error("operation {operation}: overlay contract violation: {detail}")]
    OverlayContractViolation {
        /// Offending operation.
        operation: OperationName,
        /// Violated overlay rule.
        detail: String,
    },
}

impl PlanError {
    /// Returns the operation this error concerns.
    #[must_use]
    pub const fn operation(&self) -> &OperationName {
        match self {
            Self::MalformedOperation { operation, .. }
            | Self::IncompatibleOperationChange { operation, .. }
            | Self::AmbiguousOverloadSet { operation, .. }
            | Self::OverlayContractViolation { operation, .. } => operation,
        }
    }
}
