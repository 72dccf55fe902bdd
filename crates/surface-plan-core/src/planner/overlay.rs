// crates/surface-plan-core/src/planner/overlay.rs
// ============================================================================
// Module: Overlay Merge Rule
// Description: Structural contract for hand-authored convenience signatures.
// Purpose: Keep overlay signatures distinguishable from protocol ones.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Hand-authored convenience signatures attach to the same operation name as
//! generated ones. The merge rule is the precondition that makes the
//! coexistence safe: every overlay replaces the trailing options-bag with a
//! cancellation formal, may enrich a non-body parameter's representation (at
//! most once per parameter), and may replace the payload handle with an
//! authored body model. These substitutions are exactly what the ambiguity
//! analyzer's trailing-formal exemption relies on, so the rule is checked
//! before the analyzer runs, never as a fallback.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::operation::Operation;
use crate::core::signature::FormalKind;
use crate::core::signature::Signature;
use crate::core::signature::SignatureOrigin;
use crate::error::PlanError;

// ============================================================================
// SECTION: Overlay Validation
// ============================================================================

/// Validates one overlay signature against its operation model.
///
/// # Errors
///
/// Returns [`PlanError::OverlayContractViolation`] naming the violated rule
/// when the overlay breaks the merge contract.
pub fn validate_overlay(operation: &Operation, overlay: &Signature) -> Result<(), PlanError> {
    let violation = |detail: String| PlanError::OverlayContractViolation {
        operation: operation.name.clone(),
        detail,
    };
    if overlay.origin != SignatureOrigin::Overlay {
        return Err(violation("signature is not overlay-origin".to_string()));
    }
    if overlay.operation != operation.name {
        return Err(violation(format!(
            "overlay targets operation {}, expected {}",
            overlay.operation, operation.name
        )));
    }
    let Some((last, head)) = overlay.formals.split_last() else {
        return Err(violation("overlay has no formal parameters".to_string()));
    };
    if last.kind != FormalKind::Cancellation {
        return Err(violation(format!(
            "trailing formal {last} must be a cancellation formal"
        )));
    }
    let mut payload_count = 0usize;
    let mut referenced: Vec<&str> = Vec::with_capacity(head.len());
    for formal in head {
        match formal.kind {
            FormalKind::OptionsBag | FormalKind::PropertyBag => {
                return Err(violation(format!(
                    "formal {formal} uses a protocol-only kind"
                )));
            }
            FormalKind::Cancellation => {
                return Err(violation(
                    "cancellation formal must be the trailing formal only".to_string(),
                ));
            }
            FormalKind::PayloadHandle => {
                payload_count += 1;
                if !operation.has_body() {
                    return Err(violation(format!(
                        "formal {formal} exposes a body the operation does not carry"
                    )));
                }
            }
            FormalKind::RequiredValue | FormalKind::OptionalValue => {
                if operation.non_body_parameter(&formal.name).is_none() {
                    return Err(violation(format!(
                        "formal {formal} names no declared non-body parameter"
                    )));
                }
                if referenced.contains(&formal.name.as_str()) {
                    return Err(violation(format!(
                        "parameter {} is exposed by more than one formal",
                        formal.name
                    )));
                }
                referenced.push(formal.name.as_str());
            }
        }
    }
    if payload_count > 1 {
        return Err(violation(format!(
            "{payload_count} payload formals; the body is a single logical parameter"
        )));
    }
    Ok(())
}

/// Validates a batch of overlay signatures, stopping at the first violation.
///
/// # Errors
///
/// Returns the first [`PlanError::OverlayContractViolation`] found.
pub fn validate_overlays(operation: &Operation, overlays: &[Signature]) -> Result<(), PlanError> {
    for overlay in overlays {
        validate_overlay(operation, overlay)?;
    }
    Ok(())
}
