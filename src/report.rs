//! Output formatting for run results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::extract::TokenKind;
use crate::runner::{RunOutcome, Verification};
use crate::settings::Settings;
use crate::verify::MissingToken;

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub status: String,
    pub source_dir: String,
    pub grammar: String,
    pub files_scanned: usize,
    pub complete: bool,
    pub missing_constructors: Vec<JsonMissingToken>,
    pub missing_methods: Vec<JsonMissingToken>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compiled: Vec<JsonCompiledRecipe>,
    pub constructors_defined: usize,
    pub methods_defined: usize,
}

/// An undeclared token with its first use.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonMissingToken {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonCompiledRecipe {
    pub source: String,
    pub output: String,
    pub lines: usize,
}

/// Status keyword for an outcome.
pub fn status_str(outcome: &RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::NoRecipes => "no_recipes",
        RunOutcome::Rejected(_) => "rejected",
        RunOutcome::Verified(_) => "verified",
        RunOutcome::Compiled { .. } => "compiled",
    }
}

fn missing_to_json(token: &MissingToken<'_>) -> JsonMissingToken {
    JsonMissingToken {
        name: token.name.to_string(),
        file: token.site.map(|s| s.file.clone()),
        line: token.site.map(|s| s.line),
    }
}

/// Build the JSON report for an outcome.
pub fn build_json_report(settings: &Settings, outcome: &RunOutcome) -> JsonReport {
    let mut report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: status_str(outcome).to_string(),
        source_dir: settings.source_dir.to_string_lossy().to_string(),
        grammar: settings.grammar.to_string_lossy().to_string(),
        files_scanned: 0,
        complete: outcome.passed(),
        missing_constructors: Vec::new(),
        missing_methods: Vec::new(),
        compiled: Vec::new(),
        constructors_defined: 0,
        methods_defined: 0,
    };

    if let Some(v) = outcome.verification() {
        report.files_scanned = v.files_scanned();
        report.complete = v.result.is_complete();
        report.constructors_defined = v.constructors_defined;
        report.methods_defined = v.methods_defined;
        for token in v.result.missing_tokens(&v.used) {
            match token.kind {
                TokenKind::Constructor => report.missing_constructors.push(missing_to_json(&token)),
                TokenKind::Method => report.missing_methods.push(missing_to_json(&token)),
            }
        }
    }

    report.compiled = outcome
        .compiled()
        .iter()
        .map(|c| JsonCompiledRecipe {
            source: c.source.to_string_lossy().to_string(),
            output: c.output.to_string_lossy().to_string(),
            lines: c.lines,
        })
        .collect();

    report
}

/// Write results in JSON format.
pub fn write_json(settings: &Settings, outcome: &RunOutcome) -> anyhow::Result<()> {
    let report = build_json_report(settings, outcome);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(settings: &Settings, outcome: &RunOutcome) {
    // Header
    println!();
    print!("  ");
    print!("{}", "recipec".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Recipes: ".dimmed());
    println!("{}", settings.source_dir.display());
    print!("  {}", "Grammar: ".dimmed());
    println!("{}", settings.grammar.display());
    println!();

    match outcome {
        RunOutcome::NoRecipes => {
            println!(
                "  {} No .{} files found in {}",
                "⚠".yellow(),
                settings.extension.trim_start_matches('.'),
                settings.source_dir.display()
            );
            println!("  {}", "Nothing to compile.".dimmed());
        }
        RunOutcome::Rejected(v) => {
            write_verdict(v);
            println!();
            write_missing(v);
            println!(
                "  Add the missing tokens to '{}' before compiling.",
                settings.grammar.display()
            );
            println!("  {}", "Compilation aborted.".red());
        }
        RunOutcome::Verified(v) => {
            write_verdict(v);
            println!();
            write_statistics(v, None);
        }
        RunOutcome::Compiled {
            verification,
            compiled,
        } => {
            write_verdict(verification);
            println!();

            println!("  {} ({}):", "Compiled".bold(), compiled.len());
            for recipe in compiled {
                println!(
                    "    {:<28} {}",
                    recipe.name(),
                    format!("({} lines)", recipe.lines).dimmed()
                );
            }
            print!("  {}", "Output: ".dimmed());
            println!("{}", settings.output_dir.display());
            println!();

            write_statistics(verification, Some(compiled.len()));
        }
    }
    println!();
}

fn write_verdict(v: &Verification) {
    if v.result.is_complete() {
        print!("  {}", "✓ PASS".green());
        println!("  All constructors and methods are defined in the grammar");
    } else {
        print!("  {}", "✗ FAIL".red());
        let count = v.result.missing_count();
        let plural = if count != 1 { "s" } else { "" };
        println!("  Grammar verification failed ({} missing token{})", count, plural);
    }
}

fn write_missing(v: &Verification) {
    let missing = v.result.missing_tokens(&v.used);

    for (kind, title) in [
        (TokenKind::Constructor, "Missing constructors"),
        (TokenKind::Method, "Missing methods"),
    ] {
        let entries: Vec<_> = missing.iter().filter(|t| t.kind == kind).collect();
        println!("  {} ({}):", title.bold(), entries.len());
        if entries.is_empty() {
            println!("    {}", "(none)".dimmed());
        }
        for token in entries {
            print!("    - {:<24}", token.name.yellow());
            if let Some(site) = token.site {
                print!("{}", site.file.blue());
                print!("{}", format!(":{}", site.line).dimmed());
            }
            println!();
        }
        println!();
    }
}

fn write_statistics(v: &Verification, compiled: Option<usize>) {
    println!("  {}", "Grammar statistics:".bold());
    println!("    {:<22} {:>5}", "constructors defined", v.constructors_defined);
    println!("    {:<22} {:>5}", "methods defined", v.methods_defined);
    println!("    {:<22} {:>5}", "recipes scanned", v.files_scanned());
    if let Some(count) = compiled {
        println!("    {:<22} {:>5}", "recipes compiled", count);
    }
}
