// crates/form-resolver-cli/src/main.rs
// ============================================================================
// Module: Form Resolver CLI Entry Point
// Description: Command dispatcher for template validation and resolution.
// Purpose: Resolve form templates from JSON inputs on the command line.
// Dependencies: clap, form-resolver-{core,config,providers}, serde, tracing
// ============================================================================

//! ## Overview
//! `form-resolver` validates form templates and resolves them against a
//! record, a route table, and an option catalog read from JSON files. The
//! resolved template is written to stdout as JSON; diagnostics go to stderr
//! and are filtered through `FORM_RESOLVER_LOG`.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use form_resolver_config::FormsConfig;
use form_resolver_core::AccessOracle;
use form_resolver_core::AllowAll;
use form_resolver_core::BoundRecord;
use form_resolver_core::BuildContext;
use form_resolver_core::Builder;
use form_resolver_core::DenyList;
use form_resolver_core::Record;
use form_resolver_core::RouteTable;
use form_resolver_core::Template;
use form_resolver_providers::OptionRegistry;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of any JSON input file.
const MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;
/// Environment variable holding the log filter.
const LOG_ENV: &str = "FORM_RESOLVER_LOG";
/// Log filter used when the environment does not set one.
const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "form-resolver", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the declared actions of a template.
    Validate(ValidateCommand),
    /// Resolve a template and print the result as JSON.
    Resolve(ResolveCommand),
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Template JSON file.
    #[arg(long, value_name = "PATH")]
    template: PathBuf,
}

/// Arguments for `resolve`.
#[derive(Args, Debug)]
struct ResolveCommand {
    /// Template JSON file.
    #[arg(long, value_name = "PATH")]
    template: PathBuf,
    /// Record JSON object file; without it field values are left as declared.
    #[arg(long, value_name = "PATH")]
    record: Option<PathBuf>,
    /// Field whose pending value must be kept (repeatable).
    #[arg(long = "dirty", value_name = "FIELD")]
    dirty: Vec<String>,
    /// Route table JSON file (`{ "baseUrl": ..., "routes": { name: uri } }`).
    #[arg(long, value_name = "PATH")]
    routes: Option<PathBuf>,
    /// Option catalog JSON file (`{ name: [options] | { key: label } }`).
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,
    /// Forms configuration TOML file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Route the current actor may not access (repeatable).
    #[arg(long = "deny", value_name = "ROUTE")]
    deny: Vec<String>,
    /// Print compact JSON instead of pretty JSON.
    #[arg(long)]
    compact: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
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
    init_tracing()?;
    match cli.command {
        Commands::Validate(command) => command_validate(&command),
        Commands::Resolve(command) => command_resolve(command),
    }
}

/// Installs the stderr log subscriber.
fn init_tracing() -> CliResult<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::new(format!("failed to initialize logging: {err}")))
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Validates the actions declared by a template.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let template = load_template(&command.template)?;
    template.validate_actions().map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&format!("template is valid: {}", command.template.display()))
        .map_err(|err| CliError::new(output_error(&err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Resolves a template and prints the result.
fn command_resolve(command: ResolveCommand) -> CliResult<ExitCode> {
    let template = load_template(&command.template)?;
    template.validate_actions().map_err(|err| CliError::new(err.to_string()))?;

    let config = FormsConfig::load_or_default(command.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    let record = command.record.as_deref().map(load_record).transpose()?;
    let routes = match command.routes.as_deref() {
        Some(path) => read_json::<RouteTable>(path, "route table")?,
        None => RouteTable::default(),
    };
    let options = match command.options.as_deref() {
        Some(path) => load_catalog(path)?,
        None => OptionRegistry::default(),
    };
    let restricted = !command.deny.is_empty();
    let deny_list = DenyList::new(command.deny);
    let access: &dyn AccessOracle = if restricted { &deny_list } else { &AllowAll };
    debug!(
        template = %command.template.display(),
        bound = record.is_some(),
        providers = options.names().count(),
        "resolving template from files"
    );

    let context = BuildContext {
        config: &config,
        access,
        routes: &routes,
        options: &options,
    };
    let bound = record.as_ref().map(|record| record as &dyn BoundRecord);
    let resolved = Builder::new(template, command.dirty, bound, context)
        .run()
        .map_err(|err| CliError::new(err.to_string()))?;

    let rendered = if command.compact {
        serde_json::to_string(&resolved)
    } else {
        serde_json::to_string_pretty(&resolved)
    }
    .map_err(|err| CliError::new(format!("failed to render resolved template: {err}")))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error(&err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Reads and parses a bounded JSON input file.
fn read_json<T: DeserializeOwned>(path: &Path, kind: &str) -> CliResult<T> {
    let bytes = read_bytes_with_limit(path, MAX_INPUT_BYTES).map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(format!("failed to read {kind} {}: {err}", path.display()))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(format!(
            "{kind} {} is too large ({size} bytes, limit {limit})",
            path.display()
        )),
    })?;
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(format!("failed to parse {kind} {}: {err}", path.display())))
}

/// Loads a template file.
fn load_template(path: &Path) -> CliResult<Template> {
    read_json(path, "template")
}

/// Loads a record file holding a JSON object.
fn load_record(path: &Path) -> CliResult<Record> {
    let object: Map<String, Value> = read_json(path, "record")?;
    Ok(Record::from_json_object(object))
}

/// Loads an option catalog into a registry.
fn load_catalog(path: &Path) -> CliResult<OptionRegistry> {
    let catalog: Map<String, Value> = read_json(path, "option catalog")?;
    OptionRegistry::from_catalog(&catalog).map_err(|err| CliError::new(err.to_string()))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output failure message.
fn output_error(error: &std::io::Error) -> String {
    format!("failed to write output: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
