// crates/surface-plan-core/tests/overlay_rule.rs
// ============================================================================
// Module: Overlay Merge Rule Tests
// Description: Validate the structural contract for authored signatures.
// Purpose: Ensure overlays stay distinguishable from protocol signatures.
// Dependencies: surface-plan-core
// ============================================================================

//! Merge-contract tests for hand-authored overlay signatures.

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

use surface_plan_core::FormalParameter;
use surface_plan_core::Generation;
use surface_plan_core::Operation;
use surface_plan_core::OperationName;
use surface_plan_core::Parameter;
use surface_plan_core::ParameterRole;
use surface_plan_core::PlanError;
use surface_plan_core::Signature;
use surface_plan_core::planner::validate_overlay;
use surface_plan_core::planner::validate_overlays;

type TestResult = Result<(), String>;

fn upload_operation() -> Operation {
    Operation::new(
        "UploadPetPhoto",
        vec![
            Parameter::required("id", ParameterRole::Path, 0),
            Parameter::required("photo", ParameterRole::Body, 1),
            Parameter::optional("caption", ParameterRole::Query, 2),
        ],
    )
}

fn overlay(formals: Vec<FormalParameter>) -> Signature {
    Signature::overlay(OperationName::new("UploadPetPhoto"), formals)
}

fn detail_of(result: Result<(), PlanError>) -> String {
    match result {
        Err(PlanError::OverlayContractViolation { detail, .. }) => detail,
        other => panic!("expected an overlay contract violation, got {other:?}"),
    }
}

#[test]
fn well_formed_overlay_is_accepted() -> TestResult {
    let overlay = overlay(vec![
        FormalParameter::required_value("id"),
        FormalParameter::payload_handle("photo").authored(),
        FormalParameter::optional_value("caption").authored(),
        FormalParameter::cancellation("cancel"),
    ]);
    validate_overlay(&upload_operation(), &overlay).map_err(|err| err.to_string())
}

#[test]
fn trailing_cancellation_is_mandatory() {
    let overlay = overlay(vec![
        FormalParameter::required_value("id"),
        FormalParameter::options_bag("options"),
    ]);
    let detail = detail_of(validate_overlay(&upload_operation(), &overlay));
    assert!(detail.contains("cancellation"), "unexpected detail: {detail}");
}

#[test]
fn empty_overlay_is_rejected() {
    let overlay = overlay(Vec::new());
    let detail = detail_of(validate_overlay(&upload_operation(), &overlay));
    assert!(detail.contains("no formal parameters"), "unexpected detail: {detail}");
}

#[test]
fn protocol_origin_signature_is_not_an_overlay() {
    let signature = Signature::protocol(
        OperationName::new("UploadPetPhoto"),
        Generation::ZERO,
        vec![
            FormalParameter::required_value("id"),
            FormalParameter::cancellation("cancel"),
        ],
    );
    let detail = detail_of(validate_overlay(&upload_operation(), &signature));
    assert!(detail.contains("overlay-origin"), "unexpected detail: {detail}");
}

#[test]
fn overlay_must_target_its_own_operation() {
    let stray = Signature::overlay(
        OperationName::new("GetPet"),
        vec![
            FormalParameter::required_value("id"),
            FormalParameter::cancellation("cancel"),
        ],
    );
    let detail = detail_of(validate_overlay(&upload_operation(), &stray));
    assert!(detail.contains("GetPet"), "unexpected detail: {detail}");
}

#[test]
fn options_bag_is_a_protocol_only_kind() {
    let overlay = overlay(vec![
        FormalParameter::required_value("id"),
        FormalParameter::options_bag("options"),
        FormalParameter::cancellation("cancel"),
    ]);
    let detail = detail_of(validate_overlay(&upload_operation(), &overlay));
    assert!(detail.contains("protocol-only"), "unexpected detail: {detail}");
}

#[test]
fn cancellation_may_only_trail() {
    let overlay = overlay(vec![
        FormalParameter::cancellation("cancel"),
        FormalParameter::required_value("id"),
        FormalParameter::cancellation("cancel"),
    ]);
    let detail = detail_of(validate_overlay(&upload_operation(), &overlay));
    assert!(detail.contains("trailing formal only"), "unexpected detail: {detail}");
}

#[test]
fn payload_formal_requires_a_declared_body() {
    let bodyless = Operation::new(
        "GetPet",
        vec![Parameter::required("id", ParameterRole::Path, 0)],
    );
    let overlay = Signature::overlay(
        OperationName::new("GetPet"),
        vec![
            FormalParameter::required_value("id"),
            FormalParameter::payload_handle("record").authored(),
            FormalParameter::cancellation("cancel"),
        ],
    );
    let detail = detail_of(validate_overlay(&bodyless, &overlay));
    assert!(detail.contains("body"), "unexpected detail: {detail}");
}

#[test]
fn value_formals_must_name_declared_parameters() {
    let overlay = overlay(vec![
        FormalParameter::required_value("petColor"),
        FormalParameter::cancellation("cancel"),
    ]);
    let detail = detail_of(validate_overlay(&upload_operation(), &overlay));
    assert!(detail.contains("no declared"), "unexpected detail: {detail}");
}

#[test]
fn a_parameter_may_be_exposed_at_most_once() {
    let overlay = overlay(vec![
        FormalParameter::required_value("id"),
        FormalParameter::optional_value("id").authored(),
        FormalParameter::cancellation("cancel"),
    ]);
    let detail = detail_of(validate_overlay(&upload_operation(), &overlay));
    assert!(detail.contains("more than one formal"), "unexpected detail: {detail}");
}

#[test]
fn batch_validation_stops_at_the_first_violation() {
    let good = overlay(vec![
        FormalParameter::required_value("id"),
        FormalParameter::cancellation("cancel"),
    ]);
    let bad = overlay(vec![FormalParameter::required_value("id")]);
    let result = validate_overlays(&upload_operation(), &[good, bad]);
    assert!(matches!(result, Err(PlanError::OverlayContractViolation { .. })));
}
