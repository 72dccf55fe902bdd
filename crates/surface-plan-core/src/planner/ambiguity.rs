// crates/surface-plan-core/src/planner/ambiguity.rs
// ============================================================================
// Module: Ambiguity Analyzer
// Description: Static resolution-conflict checks over a candidate surface.
// Purpose: Gate every release so the emitted surface always compiles.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The analyzer checks the full candidate set of signatures for one
//! operation (all registry generations, plus newly proposed ones, plus any
//! overlay signatures) for resolution conflicts under positional overload
//! matching.
//!
//! The model: every formal requires an argument of exactly one structural
//! category ([`crate::core::ArgumentCategory`]); a signature accepts the
//! call shapes of those formal prefixes whose remaining formals all carry
//! defaults. Two signatures whose binding shape is identical apart from
//! defaults are one callable at the link level; the later generation
//! supersedes the earlier one's emitted form, so such pairs are canonical,
//! never conflicting. The remaining pairs conflict when some call shape
//! satisfies both, unless the two trailing formals are structurally
//! incompatible by construction (options-bag versus cancellation), which is
//! what lets protocol and overlay surfaces share an operation name.
//!
//! This check runs on every release pass before publishing; it is the core
//! correctness gate keeping the evolution rules honest.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::operation::OperationName;
use crate::core::signature::ArgumentCategory;
use crate::core::signature::FormalKind;
use crate::core::signature::Signature;
use crate::error::PlanError;

// ============================================================================
// SECTION: Call Shapes
// ============================================================================

/// One positional argument-category sequence a call site can produce.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallShape(pub Vec<ArgumentCategory>);

impl fmt::Display for CallShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, category) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            category.fmt(f)?;
        }
        f.write_str(")")
    }
}

/// Returns every call shape a signature accepts, shortest first.
///
/// Binding is strictly positional: a call binds the first `n` formals and
/// every remaining formal must carry a default.
#[must_use]
pub fn accepted_shapes(signature: &Signature) -> Vec<CallShape> {
    let formals = &signature.formals;
    let mut shapes = Vec::new();
    for bound in 0 ..= formals.len() {
        if formals[bound ..].iter().all(|formal| formal.has_default) {
            shapes.push(CallShape(formals[.. bound].iter().map(|f| f.category()).collect()));
        }
    }
    shapes
}

// ============================================================================
// SECTION: Candidate Analysis
// ============================================================================

/// Checks a candidate signature set for resolution conflicts.
///
/// Signatures sharing a binding shape are first reduced to their newest
/// generation (the superseding emitted form); remaining pairs are checked
/// for a call shape satisfying both.
///
/// # Errors
///
/// Returns [`PlanError::AmbiguousOverloadSet`] with the two offending
/// signatures and the minimal conflicting call shape when a non-exempt
/// conflict is found.
pub fn analyze_candidates(
    operation: &OperationName,
    candidates: &[Signature],
) -> Result<(), PlanError> {
    let emitted = canonical_candidates(candidates);
    for (index, first) in emitted.iter().enumerate() {
        for second in &emitted[index + 1 ..] {
            if let Some(call_shape) = shared_shape(first, second) {
                if trailing_exempt(first, second) {
                    continue;
                }
                return Err(PlanError::AmbiguousOverloadSet {
                    operation: operation.clone(),
                    first: Box::new((*first).clone()),
                    second: Box::new((*second).clone()),
                    suggestion: suggest(first, second),
                    call_shape,
                });
            }
        }
    }
    Ok(())
}

/// Reduces the candidate set to the emitted surface: for signatures with an
/// identical binding shape only the newest generation survives, protocol
/// entries before overlays on ties.
#[must_use]
pub fn canonical_candidates(candidates: &[Signature]) -> Vec<&Signature> {
    let mut emitted: Vec<&Signature> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if let Some(existing) =
            emitted.iter_mut().find(|existing| existing.binding_shape_eq(candidate))
        {
            if candidate.generation >= existing.generation {
                *existing = candidate;
            }
        } else {
            emitted.push(candidate);
        }
    }
    emitted
}

/// Returns the minimal call shape accepted by both signatures, if any.
fn shared_shape(first: &Signature, second: &Signature) -> Option<CallShape> {
    let second_shapes = accepted_shapes(second);
    accepted_shapes(first).into_iter().find(|shape| second_shapes.contains(shape))
}

/// Returns true when the conflict is acceptable by construction: the two
/// trailing formals differ such that no single concrete argument value could
/// satisfy both (options-bag versus cancellation).
fn trailing_exempt(first: &Signature, second: &Signature) -> bool {
    match (first.last_formal(), second.last_formal()) {
        (Some(a), Some(b)) => {
            matches!(
                (a.kind, b.kind),
                (FormalKind::OptionsBag, FormalKind::Cancellation)
                    | (FormalKind::Cancellation, FormalKind::OptionsBag)
            )
        }
        _ => false,
    }
}

/// Proposes a disambiguation parameter change for a conflicting pair.
fn suggest(first: &Signature, second: &Signature) -> String {
    if first.origin == second.origin {
        format!(
            "remove the trailing default from {}{} or give one signature a structurally distinct \
             trailing formal",
            second.operation, second.generation
        )
    } else {
        "replace the overlay's trailing formal with a cancellation formal so the pair is \
         structurally distinct"
            .to_string()
    }
}
