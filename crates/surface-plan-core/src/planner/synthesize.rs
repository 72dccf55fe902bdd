// crates/surface-plan-core/src/planner/synthesize.rs
// ============================================================================
// Module: Signature Synthesizer
// Description: Canonical protocol signature composition for one operation.
// Purpose: Turn an operation model into its deterministic formal sequence.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The synthesizer applies the fixed composition rule to one operation
//! model: required non-body parameters in declared order as required values,
//! one payload handle when a body is present, optional non-body parameters
//! in declared order as optional values carrying any declared default
//! literal, and one trailing options-bag with a "use defaults" default.
//!
//! No model or enumeration types are synthesized regardless of the richness
//! of a parameter's declared value domain; every formal keeps the raw
//! representation. Model types require versioning work the protocol layer
//! avoids.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::operation::Operation;
use crate::core::operation::Parameter;
use crate::core::operation::ParameterRole;
use crate::core::signature::FormalParameter;
use crate::core::signature::Generation;
use crate::core::signature::Signature;
use crate::error::PlanError;

// ============================================================================
// SECTION: Formal Names
// ============================================================================

/// Fixed names for the synthesized non-parameter formals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormalNames {
    /// Name of the payload-handle formal.
    pub payload: String,
    /// Name of the trailing options-bag formal.
    pub options: String,
    /// Name of the collapsed property-bag formal.
    pub property_bag: String,
    /// Name of the overlay trailing cancellation formal.
    pub cancellation: String,
}

impl Default for FormalNames {
    fn default() -> Self {
        Self {
            payload: "body".to_string(),
            options: "options".to_string(),
            property_bag: "extras".to_string(),
            cancellation: "cancel".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Synthesis
// ============================================================================

/// Synthesizes the canonical formal sequence for an operation.
///
/// # Errors
///
/// Returns [`PlanError::MalformedOperation`] when the operation model
/// violates the single-body or unique-name invariants.
pub fn synthesize_formals(
    operation: &Operation,
    names: &FormalNames,
) -> Result<Vec<FormalParameter>, PlanError> {
    operation.validate()?;
    let mut formals = Vec::with_capacity(operation.parameters.len() + 2);
    for parameter in ordered_non_body(operation, true) {
        formals.push(FormalParameter::required_value(parameter.name.clone()));
    }
    if operation.has_body() {
        formals.push(FormalParameter::payload_handle(names.payload.clone()));
    }
    for parameter in ordered_non_body(operation, false) {
        formals.push(
            FormalParameter::optional_value(parameter.name.clone())
                .with_default(parameter.default.clone()),
        );
    }
    formals.push(FormalParameter::options_bag(names.options.clone()));
    Ok(formals)
}

/// Synthesizes the collapsed formal sequence under the threshold policy:
/// required values and the payload handle stay positional, every optional
/// parameter is absorbed by one property-bag formal addressed by string key.
///
/// # Errors
///
/// Returns [`PlanError::MalformedOperation`] when the operation model
/// violates the single-body or unique-name invariants.
pub fn collapse_formals(
    operation: &Operation,
    names: &FormalNames,
) -> Result<Vec<FormalParameter>, PlanError> {
    operation.validate()?;
    let mut formals = Vec::with_capacity(operation.parameters.len() + 3);
    for parameter in ordered_non_body(operation, true) {
        formals.push(FormalParameter::required_value(parameter.name.clone()));
    }
    if operation.has_body() {
        formals.push(FormalParameter::payload_handle(names.payload.clone()));
    }
    formals.push(FormalParameter::property_bag(names.property_bag.clone()));
    formals.push(FormalParameter::options_bag(names.options.clone()));
    Ok(formals)
}

/// Synthesizes generation zero for an operation with no prior history.
///
/// # Errors
///
/// Returns [`PlanError::MalformedOperation`] when the operation model is
/// invalid.
pub fn synthesize_generation_zero(
    operation: &Operation,
    names: &FormalNames,
) -> Result<Signature, PlanError> {
    let formals = synthesize_formals(operation, names)?;
    Ok(Signature::protocol(operation.name.clone(), Generation::ZERO, formals))
}

// ============================================================================
// SECTION: Ordering Helpers
// ============================================================================

/// Returns non-body parameters with the given required flag, sorted by
/// declared order with source position as tie-break.
fn ordered_non_body(operation: &Operation, required: bool) -> Vec<&Parameter> {
    let mut parameters: Vec<&Parameter> = operation
        .parameters
        .iter()
        .filter(|parameter| parameter.role != ParameterRole::Body && parameter.required == required)
        .collect();
    parameters.sort_by_key(|parameter| parameter.declared_order);
    parameters
}
