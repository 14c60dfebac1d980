//! recipec - grammar-checked recipe compiler.
//!
//! Recipes written in the `.food` language may only use constructors and
//! methods declared in the grammar catalog (`tokens.json`), which also drives
//! editor syntax highlighting. recipec verifies that every token used by the
//! recipes is declared and, only if it is, writes a line-numbered copy of each
//! recipe for downstream tooling.
//!
//! # Architecture
//!
//! - `extract`: recipe file snapshot and token extraction
//! - `grammar`: catalog loading, flattened into declared-name sets
//! - `verify`: completeness check (used minus declared)
//! - `annotate`: line-number transform and batch compilation
//! - `runner`: orchestrates a run and gates compilation on verification
//! - `report`: output formatting (text, JSON)
//! - `settings`: path defaults and the optional settings file

pub mod annotate;
pub mod cli;
pub mod error;
pub mod extract;
pub mod grammar;
pub mod logging;
pub mod report;
pub mod runner;
pub mod settings;
pub mod verify;

pub use annotate::{number_lines, CompiledRecipe};
pub use error::RecipeError;
pub use extract::{TokenKind, UsedTokens};
pub use grammar::GrammarRegistry;
pub use runner::{RunOutcome, Runner};
pub use settings::Settings;
pub use verify::{check, VerificationResult};
