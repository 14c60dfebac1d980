//! Command-line interface for recipec.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::report;
use crate::runner::Runner;
use crate::settings::{self, Settings, SettingsFile};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;

/// Grammar-checked recipe compiler.
///
/// Verifies that every constructor and method used in the recipes is declared
/// in the grammar catalog, then writes a line-numbered copy of each recipe.
/// Nothing is written if any token is missing from the grammar.
#[derive(Parser)]
#[command(name = "recipec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify the grammar, then compile recipes with line numbers
    #[command(visible_alias = "build")]
    Compile(CompileArgs),
    /// Verify the grammar without writing anything
    #[command(visible_alias = "check")]
    Verify(VerifyArgs),
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Directory containing recipe sources [default: converted]
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Grammar catalog (JSON) [default: ../grammar/tokens.json]
    #[arg(short, long)]
    pub grammar: Option<PathBuf>,

    /// Recipe file extension [default: food]
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Settings file (default: auto-discover recipec.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the compile command.
#[derive(Args, Debug, Clone, Default)]
pub struct CompileArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory for compiled recipes [default: compiled]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the verify command.
#[derive(Args, Debug, Clone, Default)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Resolve settings: built-in defaults, then the settings file, then flags.
fn resolve_settings(common: &CommonArgs, output: Option<&Path>) -> anyhow::Result<Settings> {
    let settings_path = match &common.config {
        Some(path) => Some(path.clone()),
        None => settings::discover(Path::new(".")),
    };

    let mut resolved = Settings::default();
    if let Some(path) = settings_path {
        let file = SettingsFile::parse_file(&path)
            .with_context(|| format!("loading settings from {}", path.display()))?;
        resolved = resolved.with_file(file);
    }

    if let Some(source) = &common.source {
        resolved.source_dir = source.clone();
    }
    if let Some(grammar) = &common.grammar {
        resolved.grammar = grammar.clone();
    }
    if let Some(ext) = &common.extension {
        resolved.extension = ext.clone();
    }
    if let Some(output) = output {
        resolved.output_dir = output.to_path_buf();
    }

    Ok(resolved)
}

fn execute(common: &CommonArgs, settings: Settings, verify_only: bool) -> anyhow::Result<i32> {
    // Validate format
    if common.format != "pretty" && common.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            common.format
        );
        return Ok(EXIT_FAILED);
    }

    let runner = Runner::new(settings).verify_only(verify_only);
    let outcome = match runner.run() {
        Ok(outcome) => outcome,
        Err(e) if e.is_configuration() => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_FAILED);
        }
        Err(e) => return Err(e.into()),
    };

    match common.format.as_str() {
        "json" => report::write_json(runner.settings(), &outcome)?,
        _ => report::write_pretty(runner.settings(), &outcome),
    }

    if outcome.passed() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the compile command.
pub fn run_compile(args: &CompileArgs) -> anyhow::Result<i32> {
    let settings = resolve_settings(&args.common, args.output.as_deref())?;
    execute(&args.common, settings, false)
}

/// Run the verify command.
pub fn run_verify(args: &VerifyArgs) -> anyhow::Result<i32> {
    let settings = resolve_settings(&args.common, None)?;
    execute(&args.common, settings, true)
}
