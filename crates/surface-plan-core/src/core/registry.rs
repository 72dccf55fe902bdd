// crates/surface-plan-core/src/core/registry.rs
// ============================================================================
// Module: Surface Registry
// Description: Append-only record of every signature ever emitted.
// Purpose: Provide the versioned compatibility contract the planner honors.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The [`SurfaceRegistry`] is the accumulated, versioned record of every
//! protocol signature ever emitted, per operation, across releases. It is
//! the single source of truth for compatibility checks: entries are appended
//! exactly once when a release introduces them and are never mutated or
//! removed.
//!
//! Appends for one operation must be serialized by the caller (single-writer
//! per release); planning passes for distinct operations share the registry
//! read-only and are independent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;
use crate::core::operation::OperationName;
use crate::core::signature::Generation;
use crate::core::signature::Signature;
use crate::core::signature::SignatureOrigin;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by registry append and validation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A signature was appended out of generation order.
    #[error("operation {operation}: expected generation {expected}, found {found}")]
    GenerationGap {
        /// Operation whose history was violated.
        operation: OperationName,
        /// Next generation the history expects.
        expected: Generation,
        /// Generation carried by the offending signature.
        found: Generation,
    },
    /// An overlay signature was offered to the protocol history.
    #[error("operation {operation}: registry holds protocol signatures only")]
    NotProtocol {
        /// Operation the overlay signature targeted.
        operation: OperationName,
    },
}

// ============================================================================
// SECTION: Surface Registry
// ============================================================================

/// Append-only, per-operation signature history.
///
/// # Invariants
/// - Every recorded signature has [`SignatureOrigin::Protocol`].
/// - Generations per operation are gap-free and strictly increasing from
///   zero; past entries are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceRegistry {
    /// Ordered signature histories keyed by operation name.
    operations: BTreeMap<OperationName, Vec<Signature>>,
}

impl SurfaceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the full history for an operation, oldest generation first.
    #[must_use]
    pub fn history(&self, operation: &OperationName) -> &[Signature] {
        self.operations.get(operation).map_or(&[], Vec::as_slice)
    }

    /// Returns the latest generation for an operation, if any.
    #[must_use]
    pub fn latest(&self, operation: &OperationName) -> Option<&Signature> {
        self.history(operation).last()
    }

    /// Iterates operation names in deterministic order.
    pub fn operation_names(&self) -> impl Iterator<Item = &OperationName> {
        self.operations.keys()
    }

    /// Returns the total number of recorded signatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.values().map(Vec::len).sum()
    }

    /// Returns true when no signature has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.values().all(Vec::is_empty)
    }

    /// Appends one signature to its operation's history.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the signature is not a protocol
    /// signature or its generation does not continue the history exactly.
    pub fn append(&mut self, signature: Signature) -> Result<(), RegistryError> {
        if signature.origin != SignatureOrigin::Protocol {
            return Err(RegistryError::NotProtocol {
                operation: signature.operation.clone(),
            });
        }
        let history = self.operations.entry(signature.operation.clone()).or_default();
        let expected = history.last().map_or(Generation::ZERO, |latest| latest.generation.next());
        if signature.generation != expected {
            return Err(RegistryError::GenerationGap {
                operation: signature.operation.clone(),
                expected,
                found: signature.generation,
            });
        }
        history.push(signature);
        Ok(())
    }

    /// Validates history invariants after deserializing a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] on the first origin or generation-sequence
    /// violation found. Loading a snapshot must fail closed.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for (operation, history) in &self.operations {
            for (index, signature) in history.iter().enumerate() {
                if signature.origin != SignatureOrigin::Protocol {
                    return Err(RegistryError::NotProtocol {
                        operation: operation.clone(),
                    });
                }
                let expected = Generation::new(u32::try_from(index).map_err(|_| {
                    RegistryError::GenerationGap {
                        operation: operation.clone(),
                        expected: Generation::ZERO,
                        found: signature.generation,
                    }
                })?);
                if signature.generation != expected {
                    return Err(RegistryError::GenerationGap {
                        operation: operation.clone(),
                        expected,
                        found: signature.generation,
                    });
                }
            }
        }
        Ok(())
    }

    /// Computes the canonical fingerprint of the full registry snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when canonical serialization fails.
    pub fn fingerprint(&self) -> Result<HashDigest, HashError> {
        hash_canonical_json(DEFAULT_HASH_ALGORITHM, &self.operations)
    }
}
