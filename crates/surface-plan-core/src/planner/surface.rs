// crates/surface-plan-core/src/planner/surface.rs
// ============================================================================
// Module: Planned Surface
// Description: Emitter-facing view of one operation's accepted surface.
// Purpose: Tag every signature with its entry point and call disposition.
// Dependencies: crate::core, crate::planner::evolution
// ============================================================================

//! ## Overview
//! The planned surface is the output contract handed to the (external)
//! emitter: an ordered-by-generation list of signatures per operation, each
//! tagged with the entry-point name to materialize and a disposition telling
//! the emitter whether to mark the callable as the recommended primary,
//! insert a forwarding body delegating to the primary, reuse a superseding
//! generation's emitted form, or attach an overlay callable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::operation::OperationName;
use crate::core::signature::Generation;
use crate::core::signature::Signature;
use crate::planner::evolution::DispatchStrategy;

// ============================================================================
// SECTION: Dispositions
// ============================================================================

/// How the emitter materializes one signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignatureDisposition {
    /// The recommended call shape; exactly one per operation with history.
    Primary,
    /// Emitted callable whose body delegates to the primary, supplying the
    /// primary's defaults for parameters this generation predates.
    Forwarding {
        /// Generation the forwarding body delegates to.
        delegates_to: Generation,
    },
    /// Not emitted separately: a later generation with the same binding
    /// shape carries this generation's call sites.
    Superseded {
        /// Generation whose emitted form covers this one.
        by: Generation,
    },
    /// Hand-authored convenience callable.
    Overlay,
}

/// One signature with its emitter instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedSignature {
    /// The signature to materialize.
    pub signature: Signature,
    /// Name of the callable the emitter produces.
    pub entry_point: String,
    /// Emission disposition.
    pub disposition: SignatureDisposition,
}

/// Full emitter view of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedSurface {
    /// Operation the surface belongs to.
    pub operation: OperationName,
    /// Protocol generations in order, followed by overlays.
    pub signatures: Vec<PlannedSignature>,
}

// ============================================================================
// SECTION: Surface Assembly
// ============================================================================

/// Builds the emitter view for one operation from its committed history and
/// accepted overlays.
#[must_use]
pub fn planned_surface(
    operation: &OperationName,
    history: &[Signature],
    overlays: &[Signature],
    dispatch: DispatchStrategy,
) -> PlannedSurface {
    let primary_generation = history.last().map(|signature| signature.generation);
    let mut signatures = Vec::with_capacity(history.len() + overlays.len());
    for (index, signature) in history.iter().enumerate() {
        let superseder = history[index + 1 ..]
            .iter()
            .find(|later| later.binding_shape_eq(signature))
            .map(|later| later.generation);
        let disposition = match (superseder, primary_generation) {
            (Some(by), _) => SignatureDisposition::Superseded { by },
            (None, Some(primary)) if signature.generation == primary => {
                SignatureDisposition::Primary
            }
            (None, Some(primary)) => SignatureDisposition::Forwarding {
                delegates_to: primary,
            },
            // A non-empty history always has a latest generation.
            (None, None) => SignatureDisposition::Primary,
        };
        let named_generation = match disposition {
            SignatureDisposition::Superseded { by } => by,
            _ => signature.generation,
        };
        signatures.push(PlannedSignature {
            entry_point: entry_point(operation, named_generation, primary_generation, dispatch),
            signature: signature.clone(),
            disposition,
        });
    }
    for overlay in overlays {
        signatures.push(PlannedSignature {
            signature: overlay.clone(),
            entry_point: operation.as_str().to_string(),
            disposition: SignatureDisposition::Overlay,
        });
    }
    PlannedSurface {
        operation: operation.clone(),
        signatures,
    }
}

/// Computes the entry-point name for a generation under the dispatch
/// strategy: a shared name for overload emission, a generation-suffixed name
/// for every non-primary generation otherwise.
fn entry_point(
    operation: &OperationName,
    generation: Generation,
    primary: Option<Generation>,
    dispatch: DispatchStrategy,
) -> String {
    match dispatch {
        DispatchStrategy::Overloads => operation.as_str().to_string(),
        DispatchStrategy::SuffixedNames => {
            if primary == Some(generation) {
                operation.as_str().to_string()
            } else {
                format!("{}_{}", operation.as_str(), generation)
            }
        }
    }
}
