// crates/surface-plan-config/src/config.rs
// ============================================================================
// Module: Surface Plan Configuration
// Description: Configuration loading and validation for the planner.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: surface-plan-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed: unknown keys are parse
//! errors rather than silent fallbacks to defaults, a planner never runs
//! with a tunable outside its documented bounds, and synthesized formal
//! names are validated as identifiers so every emitted signature is
//! well-formed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use surface_plan_core::DispatchStrategy;
use surface_plan_core::EvolutionOptions;
use surface_plan_core::FormalNames;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "surface-plan.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "SURFACE_PLAN_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum allowed optional-parameter threshold.
pub(crate) const MIN_OPTIONAL_PARAMETERS: usize = 1;
/// Maximum allowed optional-parameter threshold.
pub(crate) const MAX_OPTIONAL_PARAMETERS: usize = 64;
/// Maximum length of a synthesized formal name.
pub(crate) const MAX_FORMAL_NAME_LENGTH: usize = 64;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Surface planner configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurfacePlanConfig {
    /// Evolution planner tunables.
    #[serde(default)]
    pub evolution: EvolutionConfig,
    /// Names for the synthesized non-parameter formals.
    #[serde(default)]
    pub names: NamesConfig,
}

impl SurfacePlanConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.evolution.validate()?;
        self.names.validate()?;
        Ok(())
    }

    /// Returns the planner options this configuration describes.
    #[must_use]
    pub fn evolution_options(&self) -> EvolutionOptions {
        EvolutionOptions {
            max_optional_parameters: self.evolution.max_optional_parameters,
            dispatch: self.evolution.dispatch,
            names: self.names.formal_names(),
        }
    }
}

/// Evolution planner tunables.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvolutionConfig {
    /// Optional-parameter count above which the primary signature collapses
    /// its optional parameters into one property-bag formal.
    #[serde(default = "default_max_optional_parameters")]
    pub max_optional_parameters: usize,
    /// Overload emission strategy.
    #[serde(default)]
    pub dispatch: DispatchStrategy,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            max_optional_parameters: default_max_optional_parameters(),
            dispatch: DispatchStrategy::default(),
        }
    }
}

impl EvolutionConfig {
    /// Validates evolution tunables against their documented bounds.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_OPTIONAL_PARAMETERS ..= MAX_OPTIONAL_PARAMETERS)
            .contains(&self.max_optional_parameters)
        {
            return Err(ConfigError::Invalid(format!(
                "evolution.max_optional_parameters must be within \
                 {MIN_OPTIONAL_PARAMETERS}..={MAX_OPTIONAL_PARAMETERS}"
            )));
        }
        Ok(())
    }
}

/// Names for the synthesized non-parameter formals.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NamesConfig {
    /// Name of the payload-handle formal.
    #[serde(default = "default_payload_name")]
    pub payload: String,
    /// Name of the trailing options-bag formal.
    #[serde(default = "default_options_name")]
    pub options: String,
    /// Name of the collapsed property-bag formal.
    #[serde(default = "default_property_bag_name")]
    pub property_bag: String,
    /// Name of the overlay trailing cancellation formal.
    #[serde(default = "default_cancellation_name")]
    pub cancellation: String,
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            payload: default_payload_name(),
            options: default_options_name(),
            property_bag: default_property_bag_name(),
            cancellation: default_cancellation_name(),
        }
    }
}

impl NamesConfig {
    /// Validates each name as a distinct identifier.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_identifier("names.payload", &self.payload)?;
        validate_identifier("names.options", &self.options)?;
        validate_identifier("names.property_bag", &self.property_bag)?;
        validate_identifier("names.cancellation", &self.cancellation)?;
        let names =
            [&self.payload, &self.options, &self.property_bag, &self.cancellation];
        for (index, name) in names.iter().enumerate() {
            if names[index + 1 ..].contains(name) {
                return Err(ConfigError::Invalid(format!(
                    "names entries must be distinct: {name} appears twice"
                )));
            }
        }
        Ok(())
    }

    /// Returns the core formal-name set.
    #[must_use]
    pub fn formal_names(&self) -> FormalNames {
        FormalNames {
            payload: self.payload.clone(),
            options: self.options.clone(),
            property_bag: self.property_bag.clone(),
            cancellation: self.cancellation.clone(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default optional-parameter threshold.
const fn default_max_optional_parameters() -> usize {
    5
}

/// Default payload-handle formal name.
fn default_payload_name() -> String {
    "body".to_string()
}

/// Default options-bag formal name.
fn default_options_name() -> String {
    "options".to_string()
}

/// Default property-bag formal name.
fn default_property_bag_name() -> String {
    "extras".to_string()
}

/// Default cancellation formal name.
fn default_cancellation_name() -> String {
    "cancel".to_string()
}

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against hard limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a formal name as an identifier within the length limit.
fn validate_identifier(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_FORMAL_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let mut chars = value.chars();
    let leading_ok =
        chars.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_');
    if !leading_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::Invalid(format!(
            "{field} must be an identifier: ascii letters, digits, underscore"
        )));
    }
    Ok(())
}
