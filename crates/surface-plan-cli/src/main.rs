// crates/surface-plan-cli/src/main.rs
// ============================================================================
// Module: Surface Plan CLI Entry Point
// Description: Command dispatcher for release planning workflows.
// Purpose: Provide a safe operator CLI over operation models and registries.
// Dependencies: clap, serde, serde_json, surface-plan-config, surface-plan-core
// ============================================================================

//! ## Overview
//! The `surface-plan` CLI runs release planning passes over a normalized
//! operation-model document, a registry snapshot, and optional overlay
//! signatures. `plan` is a dry run unless `--commit` is given; `check` never
//! proposes anything and only gates the inputs. All file inputs are
//! size-limited and parsed fail-closed; nothing is written unless planning
//! succeeded end to end.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use serde::de::DeserializeOwned;
use surface_plan_config::SurfacePlanConfig;
use surface_plan_core::EvolutionOptions;
use surface_plan_core::HashDigest;
use surface_plan_core::Operation;
use surface_plan_core::Signature;
use surface_plan_core::SurfaceRegistry;
use surface_plan_core::planner::ReleasePlanner;
use surface_plan_core::planner::ReleaseReport;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of any JSON input file accepted by the CLI.
const MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "surface-plan", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a release planning pass; a dry run unless `--commit` is given.
    Plan(PlanCommand),
    /// Gate the inputs without proposing anything.
    Check(CheckCommand),
}

/// Input sources shared by `plan` and `check`.
#[derive(Args, Debug)]
struct InputArgs {
    /// Path to the normalized operation-model JSON document.
    #[arg(long, value_name = "PATH")]
    operations: PathBuf,
    /// Path to the registry snapshot JSON (omit to start from empty).
    #[arg(long, value_name = "PATH")]
    registry: Option<PathBuf>,
    /// Path to the overlay signatures JSON.
    #[arg(long, value_name = "PATH")]
    overlays: Option<PathBuf>,
    /// Optional config file path (defaults to built-in planner settings).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output path for the planning report (defaults to stdout).
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

/// Arguments for the `plan` subcommand.
#[derive(Args, Debug)]
struct PlanCommand {
    /// Input sources.
    #[command(flatten)]
    input: InputArgs,
    /// Output path for the updated registry snapshot (defaults to the
    /// `--registry` path when committing).
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
    /// Append accepted proposals and write the updated snapshot.
    #[arg(long, action = ArgAction::SetTrue)]
    commit: bool,
    /// Exit successfully even when operations were rejected.
    #[arg(long = "keep-going", action = ArgAction::SetTrue)]
    keep_going: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Input sources.
    #[command(flatten)]
    input: InputArgs,
}

// ============================================================================
// SECTION: Report Envelope
// ============================================================================

/// Operator-facing envelope around the core planning report.
#[derive(Debug, Serialize)]
struct ReportEnvelope {
    /// Registry fingerprint before the pass.
    fingerprint_before: HashDigest,
    /// Registry fingerprint after committing, when a commit happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint_after: Option<HashDigest>,
    /// True when accepted proposals were appended and written back.
    committed: bool,
    /// Per-operation planning report.
    report: ReleaseReport,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a rendered message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a rendered message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Plan(command) => command_plan(&command),
        Commands::Check(command) => command_check(&command),
    }
}

// ============================================================================
// SECTION: Plan Command
// ============================================================================

/// Runs one release planning pass, committing when requested.
fn command_plan(command: &PlanCommand) -> CliResult<ExitCode> {
    let inputs = load_inputs(&command.input)?;
    let planner = ReleasePlanner::new(inputs.options);
    let mut registry = inputs.registry;
    let fingerprint_before = fingerprint(&registry)?;
    let outcome = planner.plan_release(&registry, &inputs.operations, &inputs.overlays);

    let mut fingerprint_after = None;
    if command.commit {
        let out_path = command
            .out
            .as_deref()
            .or(command.input.registry.as_deref())
            .ok_or_else(|| {
                CliError::new("plan --commit requires --out or --registry".to_string())
            })?;
        planner
            .commit(&mut registry, &outcome)
            .map_err(|err| CliError::new(format!("commit failed: {err}")))?;
        write_json_file(out_path, &registry)?;
        fingerprint_after = Some(fingerprint(&registry)?);
    }

    let envelope = ReportEnvelope {
        fingerprint_before,
        fingerprint_after,
        committed: command.commit,
        report: outcome.report,
    };
    write_report(command.input.report.as_deref(), &envelope)?;
    if envelope.report.has_rejections() && !command.keep_going {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Gates the inputs through a dry planning pass without writing anything.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let inputs = load_inputs(&command.input)?;
    let planner = ReleasePlanner::new(inputs.options);
    let fingerprint_before = fingerprint(&inputs.registry)?;
    let outcome = planner.plan_release(&inputs.registry, &inputs.operations, &inputs.overlays);
    let envelope = ReportEnvelope {
        fingerprint_before,
        fingerprint_after: None,
        committed: false,
        report: outcome.report,
    };
    write_report(command.input.report.as_deref(), &envelope)?;
    if envelope.report.has_rejections() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Loading
// ============================================================================

/// Fully loaded and validated pass inputs.
struct PassInputs {
    /// Planner tunables resolved from configuration.
    options: EvolutionOptions,
    /// Operation models in input order.
    operations: Vec<Operation>,
    /// Registry snapshot, validated.
    registry: SurfaceRegistry,
    /// Overlay signatures, possibly empty.
    overlays: Vec<Signature>,
}

/// Loads configuration, operations, registry, and overlays fail-closed.
fn load_inputs(input: &InputArgs) -> CliResult<PassInputs> {
    let options = match input.config.as_deref() {
        Some(path) => SurfacePlanConfig::load(Some(path))
            .map_err(|err| CliError::new(format!("config load failed: {err}")))?
            .evolution_options(),
        None => EvolutionOptions::default(),
    };
    let operations: Vec<Operation> = read_json_file(&input.operations, "operations")?;
    let registry = match input.registry.as_deref() {
        Some(path) => {
            let registry: SurfaceRegistry = read_json_file(path, "registry")?;
            registry
                .validate()
                .map_err(|err| CliError::new(format!("invalid registry snapshot: {err}")))?;
            registry
        }
        None => SurfaceRegistry::new(),
    };
    let overlays: Vec<Signature> = match input.overlays.as_deref() {
        Some(path) => read_json_file(path, "overlays")?,
        None => Vec::new(),
    };
    Ok(PassInputs {
        options,
        operations,
        registry,
        overlays,
    })
}

// ============================================================================
// SECTION: IO Helpers
// ============================================================================

/// Reads a file from disk while enforcing the input size limit.
fn read_bytes_with_limit(path: &Path, kind: &str) -> CliResult<Vec<u8>> {
    let too_large =
        || CliError::new(format!("{kind} input {} exceeds size limit", path.display()));
    let io_failed = |err: std::io::Error| {
        CliError::new(format!("failed to read {kind} input {}: {err}", path.display()))
    };
    let file = File::open(path).map_err(io_failed)?;
    let size = file.metadata().map_err(io_failed)?.len();
    let limit = u64::try_from(MAX_INPUT_BYTES).map_err(|_| too_large())?;
    if size > limit {
        return Err(too_large());
    }
    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(io_failed)?;
    if bytes.len() > MAX_INPUT_BYTES {
        return Err(too_large());
    }
    Ok(bytes)
}

/// Reads and deserializes one bounded JSON input.
fn read_json_file<T: DeserializeOwned>(path: &Path, kind: &str) -> CliResult<T> {
    let bytes = read_bytes_with_limit(path, kind)?;
    serde_json::from_slice(&bytes).map_err(|err| {
        CliError::new(format!("failed to parse {kind} input {}: {err}", path.display()))
    })
}

/// Serializes a value as JSON and writes it to a file with a trailing newline.
fn write_json_file<T: Serialize>(path: &Path, value: &T) -> CliResult<()> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))?;
    bytes.push(b'\n');
    fs::write(path, bytes)
        .map_err(|err| CliError::new(format!("failed to write {}: {err}", path.display())))
}

/// Writes the report envelope to the given path, or to stdout.
fn write_report(path: Option<&Path>, envelope: &ReportEnvelope) -> CliResult<()> {
    match path {
        Some(path) => write_json_file(path, envelope),
        None => {
            let rendered = serde_json::to_string_pretty(envelope)
                .map_err(|err| CliError::new(format!("failed to serialize report: {err}")))?;
            write_stdout_line(&rendered)
                .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))
        }
    }
}

/// Computes a registry fingerprint, wrapping the error for the CLI.
fn fingerprint(registry: &SurfaceRegistry) -> CliResult<HashDigest> {
    registry
        .fingerprint()
        .map_err(|err| CliError::new(format!("failed to fingerprint registry: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
