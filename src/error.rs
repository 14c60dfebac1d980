//! Error types for the recipe compiler.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run.
///
/// A grammar that is missing tokens is not an error; it is reported as a
/// rejected [`RunOutcome`](crate::runner::RunOutcome).
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("source directory '{}' does not exist", .0.display())]
    SourceDirMissing(PathBuf),
    #[error("grammar file '{}' does not exist", .0.display())]
    GrammarMissing(PathBuf),
    #[error("grammar file '{}' is not valid JSON: {}", .path.display(), .source)]
    GrammarParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid settings file '{}': {}", .path.display(), .source)]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid recipe extension {0:?}")]
    Extension(String),
    #[error("reading '{}': {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("writing '{}': {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RecipeError {
    /// Whether this error comes from a missing prerequisite rather than bad data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RecipeError::SourceDirMissing(_) | RecipeError::GrammarMissing(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RecipeError>;
