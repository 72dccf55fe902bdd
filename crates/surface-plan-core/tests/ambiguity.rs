// crates/surface-plan-core/tests/ambiguity.rs
// ============================================================================
// Module: Ambiguity Analyzer Tests
// Description: Validate conflict detection over candidate signature sets.
// Purpose: Ensure no surface with silent resolution ambiguity is accepted.
// Dependencies: surface-plan-core
// ============================================================================

//! Resolution-conflict tests for the candidate-surface analyzer.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use surface_plan_core::ArgumentCategory;
use surface_plan_core::FormalParameter;
use surface_plan_core::Generation;
use surface_plan_core::OperationName;
use surface_plan_core::PlanError;
use surface_plan_core::Signature;
use surface_plan_core::planner::accepted_shapes;
use surface_plan_core::planner::analyze_candidates;
use surface_plan_core::planner::canonical_candidates;

fn name() -> OperationName {
    OperationName::new("GetPetsByName")
}

fn protocol(generation: u32, formals: Vec<FormalParameter>) -> Signature {
    Signature::protocol(name(), Generation::new(generation), formals)
}

#[test]
fn accepted_shapes_enumerate_default_suffixes() {
    let signature = protocol(
        0,
        vec![
            FormalParameter::required_value("petName"),
            FormalParameter::optional_value("sort"),
            FormalParameter::options_bag("options"),
        ],
    );
    let shapes = accepted_shapes(&signature);
    assert_eq!(shapes.len(), 3);
    assert_eq!(shapes[0].0, vec![ArgumentCategory::RawValue]);
    assert_eq!(shapes[1].0, vec![ArgumentCategory::RawValue, ArgumentCategory::RawValue]);
    assert_eq!(
        shapes[2].0,
        vec![
            ArgumentCategory::RawValue,
            ArgumentCategory::RawValue,
            ArgumentCategory::OptionsBag
        ]
    );
}

#[test]
fn forwarding_supersedes_its_defaulted_predecessor() {
    let defaulted = protocol(
        0,
        vec![
            FormalParameter::required_value("petName"),
            FormalParameter::optional_value("sort"),
            FormalParameter::options_bag("options"),
        ],
    );
    let forwarding = protocol(
        1,
        vec![
            FormalParameter::required_value("petName"),
            FormalParameter::required_value("sort"),
            FormalParameter::options_bag("options").without_default(),
        ],
    );
    let emitted = canonical_candidates(std::slice::from_ref(&defaulted));
    assert_eq!(emitted.len(), 1);
    let candidates = vec![defaulted, forwarding];
    let emitted = canonical_candidates(&candidates);
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].generation.get(), 1);
}

#[test]
fn case_c_output_passes_the_gate() {
    // gen0 superseded by gen1; gen1 accepts only its full shape; gen2 adds
    // the new optional. No shared call shape remains.
    let gen0 = protocol(
        0,
        vec![
            FormalParameter::required_value("petName"),
            FormalParameter::optional_value("sort"),
            FormalParameter::options_bag("options"),
        ],
    );
    let gen1 = protocol(
        1,
        vec![
            FormalParameter::required_value("petName"),
            FormalParameter::required_value("sort"),
            FormalParameter::options_bag("options").without_default(),
        ],
    );
    let gen2 = protocol(
        2,
        vec![
            FormalParameter::required_value("petName"),
            FormalParameter::optional_value("sort"),
            FormalParameter::optional_value("species"),
            FormalParameter::options_bag("options"),
        ],
    );
    let candidates = vec![gen0, gen1, gen2];
    assert!(analyze_candidates(&name(), &candidates).is_ok());
}

#[test]
fn equal_arity_defaulted_pair_conflicts() {
    let first = protocol(
        0,
        vec![
            FormalParameter::required_value("petName"),
            FormalParameter::optional_value("sort"),
            FormalParameter::options_bag("options"),
        ],
    );
    let second = protocol(
        1,
        vec![
            FormalParameter::required_value("petName"),
            FormalParameter::optional_value("species"),
            FormalParameter::options_bag("settings"),
        ],
    );
    let candidates = vec![first, second];
    match analyze_candidates(&name(), &candidates) {
        Err(PlanError::AmbiguousOverloadSet { call_shape, .. }) => {
            // The minimal conflicting shape is the bare required argument.
            assert_eq!(call_shape.0, vec![ArgumentCategory::RawValue]);
        }
        other => panic!("expected an ambiguity conflict, got {other:?}"),
    }
}

#[test]
fn options_bag_versus_cancellation_is_exempt() {
    let protocol_signature = protocol(
        0,
        vec![
            FormalParameter::required_value("id"),
            FormalParameter::options_bag("options"),
        ],
    );
    let overlay_signature = Signature::overlay(
        name(),
        vec![
            FormalParameter::required_value("id"),
            FormalParameter::cancellation("cancel"),
        ],
    );
    let candidates = vec![protocol_signature, overlay_signature];
    assert!(analyze_candidates(&name(), &candidates).is_ok());
}

#[test]
fn authored_payload_never_collides_with_a_raw_handle() {
    let protocol_signature = protocol(
        0,
        vec![
            FormalParameter::required_value("id"),
            FormalParameter::payload_handle("body"),
            FormalParameter::options_bag("options"),
        ],
    );
    let overlay_signature = Signature::overlay(
        name(),
        vec![
            FormalParameter::required_value("id"),
            FormalParameter::payload_handle("pet").authored(),
            FormalParameter::cancellation("cancel"),
        ],
    );
    let candidates = vec![protocol_signature, overlay_signature];
    assert!(analyze_candidates(&name(), &candidates).is_ok());
}

#[test]
fn overlapping_overlays_are_reported_with_both_signatures() {
    let first = Signature::overlay(
        name(),
        vec![
            FormalParameter::required_value("id"),
            FormalParameter::cancellation("cancel"),
        ],
    );
    let second = Signature::overlay(
        name(),
        vec![
            FormalParameter::required_value("id"),
            FormalParameter::optional_value("species").authored(),
            FormalParameter::cancellation("cancel"),
        ],
    );
    let candidates = vec![first, second];
    match analyze_candidates(&name(), &candidates) {
        Err(PlanError::AmbiguousOverloadSet { first, second, .. }) => {
            assert_eq!(first.operation.as_str(), "GetPetsByName");
            assert_eq!(second.operation.as_str(), "GetPetsByName");
        }
        other => panic!("expected an ambiguity conflict, got {other:?}"),
    }
}
