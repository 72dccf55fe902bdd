// crates/surface-plan-core/src/core/operation.rs
// ============================================================================
// Module: Operation Model
// Description: Normalized representation of one remote service operation.
// Purpose: Provide the validated input contract consumed by the planner.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`Operation`] is the normalized description of one remote callable
//! action: its parameters (name, role, required flag, declared order) and
//! whether it carries a request body. Operation models are produced by an
//! upstream description parser and are stable by name across releases; two
//! models with the same name are the same logical operation.
//!
//! The core never inspects payload contents. The body, when present, is a
//! single pre-merged logical parameter with [`ParameterRole::Body`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::error::PlanError;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Operation identifier, unique within a service surface.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationName(String);

impl OperationName {
    /// Creates a new operation name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// Transport role of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterRole {
    /// Path segment parameter.
    Path,
    /// Query string parameter.
    Query,
    /// Request header parameter.
    Header,
    /// Logical request body parameter (at most one per operation).
    Body,
}

/// One declared parameter of a remote operation.
///
/// # Invariants
/// - `name` is unique within the owning [`Operation`].
/// - `declared_order` reflects the position in the source description and is
///   the tie-break ordering used by signature synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter identifier.
    pub name: String,
    /// Transport role.
    pub role: ParameterRole,
    /// True when the service description declares the parameter required.
    pub required: bool,
    /// Position in the source description.
    pub declared_order: u32,
    /// Service-declared default literal, opaque to the planner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Parameter {
    /// Creates a required parameter with the given role and order.
    #[must_use]
    pub fn required(name: impl Into<String>, role: ParameterRole, declared_order: u32) -> Self {
        Self {
            name: name.into(),
            role,
            required: true,
            declared_order,
            default: None,
        }
    }

    /// Creates an optional parameter with the given role and order.
    #[must_use]
    pub fn optional(name: impl Into<String>, role: ParameterRole, declared_order: u32) -> Self {
        Self {
            name: name.into(),
            role,
            required: false,
            declared_order,
            default: None,
        }
    }

    /// Sets the service-declared default literal.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

// ============================================================================
// SECTION: Operation
// ============================================================================

/// Normalized model of one remote operation.
///
/// # Invariants
/// - At most one parameter carries [`ParameterRole::Body`]; the upstream
///   parser pre-merges body-bearing fields into one logical payload.
/// - Parameter names are unique within the operation.
///
/// Both invariants are enforced by [`Operation::validate`], which the
/// planner runs before any synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation identifier, stable across releases.
    pub name: OperationName,
    /// Declared parameters in source order.
    pub parameters: Vec<Parameter>,
}

impl Operation {
    /// Creates an operation from a name and parameter list.
    #[must_use]
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            name: OperationName::new(name),
            parameters,
        }
    }

    /// Returns true when some parameter carries the body role.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.parameters.iter().any(|parameter| parameter.role == ParameterRole::Body)
    }

    /// Returns the declared non-body parameter with the given name, if any.
    #[must_use]
    pub fn non_body_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|parameter| parameter.role != ParameterRole::Body && parameter.name == name)
    }

    /// Validates the operation model invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::MalformedOperation`] when more than one body
    /// parameter is present or when parameter names collide. Both are
    /// upstream contract bugs and are fatal for this operation.
    pub fn validate(&self) -> Result<(), PlanError> {
        let body_count =
            self.parameters.iter().filter(|parameter| parameter.role == ParameterRole::Body).count();
        if body_count > 1 {
            return Err(PlanError::MalformedOperation {
                operation: self.name.clone(),
                detail: format!("{body_count} body parameters after parser normalization"),
            });
        }
        let mut seen: Vec<&str> = Vec::with_capacity(self.parameters.len());
        for parameter in &self.parameters {
            if seen.contains(&parameter.name.as_str()) {
                return Err(PlanError::MalformedOperation {
                    operation: self.name.clone(),
                    detail: format!("duplicate parameter name: {}", parameter.name),
                });
            }
            seen.push(parameter.name.as_str());
        }
        Ok(())
    }
}
