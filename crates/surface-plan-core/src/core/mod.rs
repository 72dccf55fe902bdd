// crates/surface-plan-core/src/core/mod.rs
// ============================================================================
// Module: Surface Plan Core Types
// Description: Operation models, signatures, and the surface registry.
// Purpose: Provide stable, serializable types for surface planning.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types model remote operations as the upstream parser hands them
//! over, the signatures exposed to callers, and the append-only registry of
//! every signature ever emitted. These types are the canonical source of
//! truth for any derived SDK surface.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod hashing;
pub mod operation;
pub mod registry;
pub mod signature;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use operation::Operation;
pub use operation::OperationName;
pub use operation::Parameter;
pub use operation::ParameterRole;
pub use registry::RegistryError;
pub use registry::SurfaceRegistry;
pub use signature::ArgumentCategory;
pub use signature::FormalKind;
pub use signature::FormalParameter;
pub use signature::FormalSeq;
pub use signature::Generation;
pub use signature::Representation;
pub use signature::Signature;
pub use signature::SignatureOrigin;
