// crates/surface-plan-config/tests/load_validation.rs
// ============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// ============================================================================

//! Config load validation tests for surface-plan-config.

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

use std::io::Write;
use std::path::Path;

use surface_plan_config::ConfigError;
use surface_plan_config::SurfacePlanConfig;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<SurfacePlanConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

fn write_config(content: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content.as_bytes()).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(SurfacePlanConfig::load(Some(path)), "config path exceeds max length")?;
    Ok(())
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(SurfacePlanConfig::load(Some(path)), "config path component too long")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(SurfacePlanConfig::load(Some(file.path())), "config file exceeds size limit")?;
    Ok(())
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(SurfacePlanConfig::load(Some(file.path())), "config file must be utf-8")?;
    Ok(())
}

#[test]
fn load_rejects_malformed_toml() -> TestResult {
    let file = write_config("[evolution\nmax_optional_parameters = 5")?;
    assert_invalid(SurfacePlanConfig::load(Some(file.path())), "config parse error")?;
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    let file = write_config("[evolution]\nmax_optionalparameters = 8\n")?;
    assert_invalid(SurfacePlanConfig::load(Some(file.path())), "config parse error")?;
    let file = write_config("[evolutin]\nmax_optional_parameters = 8\n")?;
    assert_invalid(SurfacePlanConfig::load(Some(file.path())), "config parse error")?;
    Ok(())
}

#[test]
fn empty_file_yields_defaults() -> TestResult {
    let file = write_config("")?;
    let config = SurfacePlanConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    let options = config.evolution_options();
    assert_eq!(options.max_optional_parameters, 5);
    assert_eq!(options.names.payload, "body");
    assert_eq!(options.names.options, "options");
    assert_eq!(options.names.property_bag, "extras");
    assert_eq!(options.names.cancellation, "cancel");
    Ok(())
}

#[test]
fn explicit_settings_map_to_planner_options() -> TestResult {
    let file = write_config(
        "[evolution]\n\
         max_optional_parameters = 8\n\
         dispatch = \"suffixed_names\"\n\
         \n\
         [names]\n\
         payload = \"content\"\n",
    )?;
    let config = SurfacePlanConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    let options = config.evolution_options();
    assert_eq!(options.max_optional_parameters, 8);
    assert_eq!(options.names.payload, "content");
    assert_eq!(options.names.options, "options");
    Ok(())
}

#[test]
fn threshold_of_zero_is_out_of_bounds() -> TestResult {
    let file = write_config("[evolution]\nmax_optional_parameters = 0\n")?;
    assert_invalid(
        SurfacePlanConfig::load(Some(file.path())),
        "evolution.max_optional_parameters must be within",
    )?;
    Ok(())
}

#[test]
fn threshold_above_the_ceiling_is_out_of_bounds() -> TestResult {
    let file = write_config("[evolution]\nmax_optional_parameters = 65\n")?;
    assert_invalid(
        SurfacePlanConfig::load(Some(file.path())),
        "evolution.max_optional_parameters must be within",
    )?;
    Ok(())
}

#[test]
fn formal_names_must_be_identifiers() -> TestResult {
    let file = write_config("[names]\npayload = \"pet record\"\n")?;
    assert_invalid(
        SurfacePlanConfig::load(Some(file.path())),
        "names.payload must be an identifier",
    )?;
    Ok(())
}

#[test]
fn formal_names_must_not_start_with_a_digit() -> TestResult {
    let file = write_config("[names]\noptions = \"1options\"\n")?;
    assert_invalid(
        SurfacePlanConfig::load(Some(file.path())),
        "names.options must be an identifier",
    )?;
    Ok(())
}

#[test]
fn empty_formal_name_is_rejected() -> TestResult {
    let file = write_config("[names]\ncancellation = \"\"\n")?;
    assert_invalid(
        SurfacePlanConfig::load(Some(file.path())),
        "names.cancellation must be non-empty",
    )?;
    Ok(())
}

#[test]
fn duplicate_formal_names_are_rejected() -> TestResult {
    let file = write_config("[names]\npayload = \"options\"\n")?;
    assert_invalid(
        SurfacePlanConfig::load(Some(file.path())),
        "names entries must be distinct",
    )?;
    Ok(())
}
