// crates/surface-plan-core/tests/synthesis.rs
// ============================================================================
// Module: Signature Synthesis Tests
// Description: Validate the canonical protocol composition rule.
// Purpose: Ensure synthesized formal sequences are deterministic and raw.
// Dependencies: surface-plan-core
// ============================================================================

//! Composition-rule tests for the signature synthesizer.

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

use surface_plan_core::FormalKind;
use surface_plan_core::FormalNames;
use surface_plan_core::Operation;
use surface_plan_core::Parameter;
use surface_plan_core::ParameterRole;
use surface_plan_core::PlanError;
use surface_plan_core::Representation;
use surface_plan_core::planner::synthesize_formals;
use surface_plan_core::planner::synthesize_generation_zero;

type TestResult = Result<(), String>;

fn kinds(formals: &[surface_plan_core::FormalParameter]) -> Vec<(String, FormalKind)> {
    formals.iter().map(|formal| (formal.name.clone(), formal.kind)).collect()
}

#[test]
fn single_required_path_parameter() -> TestResult {
    let operation = Operation::new(
        "GetPet",
        vec![Parameter::required("id", ParameterRole::Path, 0)],
    );
    let formals =
        synthesize_formals(&operation, &FormalNames::default()).map_err(|err| err.to_string())?;
    assert_eq!(
        kinds(&formals),
        vec![
            ("id".to_string(), FormalKind::RequiredValue),
            ("options".to_string(), FormalKind::OptionsBag),
        ]
    );
    Ok(())
}

#[test]
fn required_before_payload_before_optional_before_options() -> TestResult {
    let operation = Operation::new(
        "CreateOrUpdatePet",
        vec![
            Parameter::optional("verbose", ParameterRole::Query, 3),
            Parameter::required("id", ParameterRole::Path, 0),
            Parameter::required("payload", ParameterRole::Body, 1),
            Parameter::required("region", ParameterRole::Header, 2),
        ],
    );
    let formals =
        synthesize_formals(&operation, &FormalNames::default()).map_err(|err| err.to_string())?;
    assert_eq!(
        kinds(&formals),
        vec![
            ("id".to_string(), FormalKind::RequiredValue),
            ("region".to_string(), FormalKind::RequiredValue),
            ("body".to_string(), FormalKind::PayloadHandle),
            ("verbose".to_string(), FormalKind::OptionalValue),
            ("options".to_string(), FormalKind::OptionsBag),
        ]
    );
    Ok(())
}

#[test]
fn declared_order_breaks_ties_within_each_block() -> TestResult {
    let operation = Operation::new(
        "ListPets",
        vec![
            Parameter::optional("skip", ParameterRole::Query, 4),
            Parameter::optional("limit", ParameterRole::Query, 2),
            Parameter::required("scope", ParameterRole::Path, 3),
            Parameter::required("tenant", ParameterRole::Path, 1),
        ],
    );
    let formals =
        synthesize_formals(&operation, &FormalNames::default()).map_err(|err| err.to_string())?;
    let names: Vec<&str> = formals.iter().map(|formal| formal.name.as_str()).collect();
    assert_eq!(names, vec!["tenant", "scope", "limit", "skip", "options"]);
    Ok(())
}

#[test]
fn every_synthesized_formal_is_raw() -> TestResult {
    let operation = Operation::new(
        "UpdatePet",
        vec![
            Parameter::required("id", ParameterRole::Path, 0),
            Parameter::required("payload", ParameterRole::Body, 1),
            Parameter::optional("dry_run", ParameterRole::Query, 2).with_default("false"),
        ],
    );
    let formals =
        synthesize_formals(&operation, &FormalNames::default()).map_err(|err| err.to_string())?;
    assert!(formals.iter().all(|formal| formal.representation == Representation::Raw));
    Ok(())
}

#[test]
fn optional_formals_and_options_bag_carry_defaults() -> TestResult {
    let operation = Operation::new(
        "ListPets",
        vec![
            Parameter::required("tenant", ParameterRole::Path, 0),
            Parameter::optional("limit", ParameterRole::Query, 1),
        ],
    );
    let formals =
        synthesize_formals(&operation, &FormalNames::default()).map_err(|err| err.to_string())?;
    let defaults: Vec<bool> = formals.iter().map(|formal| formal.has_default).collect();
    assert_eq!(defaults, vec![false, true, true]);
    Ok(())
}

#[test]
fn declared_default_literals_flow_into_optional_formals() -> TestResult {
    let operation = Operation::new(
        "ListPets",
        vec![
            Parameter::required("tenant", ParameterRole::Path, 0),
            Parameter::optional("limit", ParameterRole::Query, 1).with_default("50"),
            Parameter::optional("cursor", ParameterRole::Query, 2),
        ],
    );
    let formals =
        synthesize_formals(&operation, &FormalNames::default()).map_err(|err| err.to_string())?;
    assert_eq!(formals[1].name, "limit");
    assert_eq!(formals[1].default.as_deref(), Some("50"));
    assert!(formals[1].has_default);
    // An optional parameter without a declared literal defaults to absent.
    assert_eq!(formals[2].name, "cursor");
    assert_eq!(formals[2].default, None);
    assert!(formals[2].has_default);
    Ok(())
}

#[test]
fn generation_zero_starts_the_history() -> TestResult {
    let operation = Operation::new(
        "GetPet",
        vec![Parameter::required("id", ParameterRole::Path, 0)],
    );
    let signature = synthesize_generation_zero(&operation, &FormalNames::default())
        .map_err(|err| err.to_string())?;
    assert_eq!(signature.generation.get(), 0);
    assert_eq!(signature.operation.as_str(), "GetPet");
    Ok(())
}

#[test]
fn second_body_parameter_is_a_fatal_contract_violation() {
    let operation = Operation::new(
        "BrokenUpload",
        vec![
            Parameter::required("first", ParameterRole::Body, 0),
            Parameter::required("second", ParameterRole::Body, 1),
        ],
    );
    let result = synthesize_formals(&operation, &FormalNames::default());
    assert!(matches!(result, Err(PlanError::MalformedOperation { .. })));
}

#[test]
fn duplicate_parameter_names_are_rejected() {
    let operation = Operation::new(
        "BrokenList",
        vec![
            Parameter::required("id", ParameterRole::Path, 0),
            Parameter::optional("id", ParameterRole::Query, 1),
        ],
    );
    let result = synthesize_formals(&operation, &FormalNames::default());
    assert!(matches!(result, Err(PlanError::MalformedOperation { .. })));
}

#[test]
fn formal_names_are_configurable() -> TestResult {
    let names = FormalNames {
        payload: "content".to_string(),
        options: "context".to_string(),
        property_bag: "extra".to_string(),
        cancellation: "token".to_string(),
    };
    let operation = Operation::new(
        "UploadPetPhoto",
        vec![
            Parameter::required("id", ParameterRole::Path, 0),
            Parameter::required("photo", ParameterRole::Body, 1),
        ],
    );
    let formals = synthesize_formals(&operation, &names).map_err(|err| err.to_string())?;
    let formal_names: Vec<&str> = formals.iter().map(|formal| formal.name.as_str()).collect();
    assert_eq!(formal_names, vec!["id", "content", "context"]);
    Ok(())
}
