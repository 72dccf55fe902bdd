// crates/surface-plan-config/src/lib.rs
// ============================================================================
// Module: Surface Plan Config Library
// Description: Canonical configuration model and validation.
// Purpose: Single source of truth for surface-plan.toml semantics.
// Dependencies: surface-plan-core, serde, toml
// ============================================================================

//! ## Overview
//! `surface-plan-config` defines the canonical configuration model for the
//! surface planner. Loading is strict and fail-closed: size and path limits
//! are enforced before parsing, and every tunable is bounds-checked before a
//! planner ever sees it.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
