// crates/surface-plan-core/src/planner/evolution.rs
// ============================================================================
// Module: Evolution Planner
// Description: Surface evolution cases over the registry history.
// Purpose: Compute the minimal signature set keeping old call sites callable.
// Dependencies: crate::core, crate::planner::synthesize
// ============================================================================

//! ## Overview
//! Given a new operation description and the registry's history for that
//! operation, the planner computes the minimal set of new signatures so the
//! new surface is a strict superset of the old one:
//!
//! - no prior history: propose generation zero;
//! - synthesized signature equals the latest generation: nothing to do
//!   (body and response shape changes land here, since only a payload handle
//!   is exposed and the return contract is an opaque envelope);
//! - only new optional parameters were inserted: propose a default-less
//!   forwarding generation that binds previously compiled call sites
//!   exactly, then the new full signature as the primary;
//! - anything else is an incompatible change requiring a human-designed
//!   migration.
//!
//! Planning is a pure function over `(history, operation, options)`; a
//! separate [`apply_plan`] step appends accepted proposals under the
//! registry's single-writer discipline, so planning twice without applying
//! proposes the same signatures both times.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::operation::Operation;
use crate::core::registry::RegistryError;
use crate::core::registry::SurfaceRegistry;
use crate::core::signature::FormalKind;
use crate::core::signature::FormalParameter;
use crate::core::signature::FormalSeq;
use crate::core::signature::Generation;
use crate::core::signature::Signature;
use crate::error::PlanError;
use crate::planner::synthesize::FormalNames;
use crate::planner::synthesize::collapse_formals;
use crate::planner::synthesize::synthesize_formals;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Strategy for materializing multiple generations of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStrategy {
    /// Emit all generations under one name and rely on the target
    /// language's overload resolution; the ambiguity gate applies.
    #[default]
    Overloads,
    /// Emit each non-primary generation under a distinct generation-suffixed
    /// entry point; overload resolution and its ambiguity question are
    /// sidestepped entirely.
    SuffixedNames,
}

/// Tunables for the evolution planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionOptions {
    /// Optional-parameter count above which the primary signature collapses
    /// every optional parameter into one property-bag formal.
    pub max_optional_parameters: usize,
    /// Overload emission strategy.
    pub dispatch: DispatchStrategy,
    /// Names for the synthesized non-parameter formals.
    pub names: FormalNames,
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            max_optional_parameters: 5,
            dispatch: DispatchStrategy::default(),
            names: FormalNames::default(),
        }
    }
}

// ============================================================================
// SECTION: Plan Output
// ============================================================================

/// Classification of one operation's planning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOutcome {
    /// The surface already covers the new description.
    Unchanged,
    /// New signatures extend the surface.
    Extended,
    /// The primary signature collapsed its optional parameters into a
    /// property bag under the threshold policy.
    BagCollapsed,
}

/// Proposed evolution for one operation.
///
/// # Invariants
/// - `proposed` generations continue the history gap-free, oldest first.
/// - The registry is never consulted mutably; applying is a separate step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionPlan {
    /// Planning classification.
    pub outcome: PlanOutcome,
    /// Signatures to append, oldest first; empty for an unchanged surface.
    pub proposed: Vec<Signature>,
}

// ============================================================================
// SECTION: Planning
// ============================================================================

/// Plans the evolution of one operation against its registry history.
///
/// # Errors
///
/// Returns [`PlanError::MalformedOperation`] for model-invariant violations
/// and [`PlanError::IncompatibleOperationChange`] when the change cannot be
/// planned automatically. Neither mutates any state.
pub fn plan_operation(
    history: &[Signature],
    operation: &Operation,
    options: &EvolutionOptions,
) -> Result<EvolutionPlan, PlanError> {
    let synthesized = synthesize_formals(operation, &options.names)?;
    let optional_count =
        synthesized.iter().filter(|formal| formal.kind == FormalKind::OptionalValue).count();
    let over_threshold = optional_count > options.max_optional_parameters;

    let Some(latest) = history.last() else {
        let formals = if over_threshold {
            collapse_formals(operation, &options.names)?
        } else {
            synthesized
        };
        let outcome = if over_threshold { PlanOutcome::BagCollapsed } else { PlanOutcome::Extended };
        return Ok(EvolutionPlan {
            outcome,
            proposed: vec![Signature::protocol(operation.name.clone(), Generation::ZERO, formals)],
        });
    };

    // A bag-collapsed history absorbs optional additions without growth.
    if latest.formals.iter().any(|formal| formal.kind == FormalKind::PropertyBag) {
        let collapsed = collapse_formals(operation, &options.names)?;
        if latest.formals == collapsed {
            return Ok(EvolutionPlan {
                outcome: PlanOutcome::Unchanged,
                proposed: Vec::new(),
            });
        }
        return Err(incompatible(latest, collapsed));
    }

    if latest.formals == synthesized {
        return Ok(EvolutionPlan {
            outcome: PlanOutcome::Unchanged,
            proposed: Vec::new(),
        });
    }

    if !is_optional_extension(&latest.formals, &synthesized) {
        return Err(incompatible(latest, synthesized));
    }

    let mut proposed = Vec::with_capacity(2);
    let forwarding = forwarding_formals(&latest.formals);
    let mut generation = latest.generation.next();
    proposed.push(Signature::protocol(operation.name.clone(), generation, forwarding));
    generation = generation.next();
    let (outcome, primary) = if over_threshold {
        (PlanOutcome::BagCollapsed, collapse_formals(operation, &options.names)?)
    } else {
        (PlanOutcome::Extended, synthesized)
    };
    proposed.push(Signature::protocol(operation.name.clone(), generation, primary));
    Ok(EvolutionPlan { outcome, proposed })
}

/// Appends a plan's proposed signatures to the registry.
///
/// # Errors
///
/// Returns [`RegistryError`] when a proposal does not continue the history
/// exactly; no partial append is left behind for the operation because the
/// first failing proposal is the first appended.
pub fn apply_plan(registry: &mut SurfaceRegistry, plan: &EvolutionPlan) -> Result<(), RegistryError> {
    for signature in &plan.proposed {
        registry.append(signature.clone())?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Case Analysis Helpers
// ============================================================================

/// Builds the incompatible-change error with both shapes attached.
fn incompatible(latest: &Signature, proposed: Vec<FormalParameter>) -> PlanError {
    PlanError::IncompatibleOperationChange {
        operation: latest.operation.clone(),
        previous: Box::new(latest.clone()),
        proposed: FormalSeq(proposed),
    }
}

/// Returns true when `new` differs from `old` only by insertion of optional
/// values: both end with an options-bag, the old formals (bag excluded) are
/// an order-preserving subsequence of the new ones, and every unmatched new
/// formal is an optional value with a default.
fn is_optional_extension(old: &[FormalParameter], new: &[FormalParameter]) -> bool {
    let (Some((old_bag, old_head)), Some((new_bag, new_head))) =
        (old.split_last(), new.split_last())
    else {
        return false;
    };
    if old_bag.kind != FormalKind::OptionsBag || new_bag.kind != FormalKind::OptionsBag {
        return false;
    }
    let mut old_iter = old_head.iter().peekable();
    for formal in new_head {
        match old_iter.peek() {
            Some(candidate) if *candidate == formal => {
                let _ = old_iter.next();
            }
            _ => {
                if formal.kind != FormalKind::OptionalValue || !formal.has_default {
                    return false;
                }
            }
        }
    }
    old_iter.peek().is_none()
}

/// Builds the forwarding formal sequence for a prior generation: every
/// formal loses its default and optional values become required-in-form, so
/// the forwarding signature accepts exactly the full call shape previously
/// compiled call sites use. Its body delegates to the primary with that
/// primary's defaults for the newly introduced parameters.
fn forwarding_formals(prior: &[FormalParameter]) -> Vec<FormalParameter> {
    prior
        .iter()
        .map(|formal| {
            let mut forwarded = formal.clone().without_default();
            if forwarded.kind == FormalKind::OptionalValue {
                forwarded.kind = FormalKind::RequiredValue;
            }
            forwarded
        })
        .collect()
}
