//! Run orchestration: load grammar, extract, verify, then compile.
//!
//! Nothing is written unless verification passes. The recipe file list is
//! read once and the same snapshot feeds both extraction and compilation.

use tracing::{info, warn};

use crate::annotate::{compile_all, CompiledRecipe};
use crate::error::{RecipeError, Result};
use crate::extract::{collect_recipe_files, extract_tokens, UsedTokens};
use crate::grammar::GrammarRegistry;
use crate::settings::Settings;
use crate::verify::{check, VerificationResult};

/// Tokens, verdict and grammar size for one run.
#[derive(Debug, Clone)]
pub struct Verification {
    pub used: UsedTokens,
    pub result: VerificationResult,
    pub constructors_defined: usize,
    pub methods_defined: usize,
}

impl Verification {
    pub fn files_scanned(&self) -> usize {
        self.used.files_scanned()
    }
}

/// How a run ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The source directory holds no recipe files.
    NoRecipes,
    /// Some used tokens are not in the grammar. Nothing was written.
    Rejected(Verification),
    /// Verification passed and compilation was not requested.
    Verified(Verification),
    /// Verification passed and every recipe was compiled.
    Compiled {
        verification: Verification,
        compiled: Vec<CompiledRecipe>,
    },
}

impl RunOutcome {
    /// Whether the run should be reported as successful.
    pub fn passed(&self) -> bool {
        !matches!(self, RunOutcome::Rejected(_))
    }

    pub fn verification(&self) -> Option<&Verification> {
        match self {
            RunOutcome::NoRecipes => None,
            RunOutcome::Rejected(v) | RunOutcome::Verified(v) => Some(v),
            RunOutcome::Compiled { verification, .. } => Some(verification),
        }
    }

    pub fn compiled(&self) -> &[CompiledRecipe] {
        match self {
            RunOutcome::Compiled { compiled, .. } => compiled,
            _ => &[],
        }
    }
}

/// Executes one verification and compilation pass.
pub struct Runner {
    settings: Settings,
    verify_only: bool,
}

impl Runner {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            verify_only: false,
        }
    }

    /// Stop after verification without writing any output.
    pub fn verify_only(mut self, verify_only: bool) -> Self {
        self.verify_only = verify_only;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn run(&self) -> Result<RunOutcome> {
        let settings = &self.settings;

        if !settings.source_dir.is_dir() {
            return Err(RecipeError::SourceDirMissing(settings.source_dir.clone()));
        }
        if !settings.grammar.is_file() {
            return Err(RecipeError::GrammarMissing(settings.grammar.clone()));
        }

        let grammar = GrammarRegistry::load(&settings.grammar)?;
        info!(
            grammar = %settings.grammar.display(),
            constructors = grammar.constructor_count(),
            methods = grammar.method_count(),
            "grammar loaded"
        );

        let files = collect_recipe_files(&settings.source_dir, &settings.extension)?;
        if files.is_empty() {
            warn!(
                source_dir = %settings.source_dir.display(),
                extension = %settings.extension,
                "no recipe files found"
            );
            return Ok(RunOutcome::NoRecipes);
        }

        let used = extract_tokens(&files)?;
        info!(
            files = files.len(),
            constructors = used.constructors().len(),
            methods = used.methods().len(),
            "tokens extracted"
        );

        let result = check(
            used.constructors(),
            used.methods(),
            grammar.constructors(),
            grammar.methods(),
        );
        let verification = Verification {
            used,
            result,
            constructors_defined: grammar.constructor_count(),
            methods_defined: grammar.method_count(),
        };

        if !verification.result.is_complete() {
            warn!(
                missing = verification.result.missing_count(),
                "grammar verification failed"
            );
            return Ok(RunOutcome::Rejected(verification));
        }
        info!("grammar verification passed");

        if self.verify_only {
            return Ok(RunOutcome::Verified(verification));
        }

        let compiled = compile_all(&files, &settings.output_dir)?;
        info!(
            count = compiled.len(),
            output_dir = %settings.output_dir.display(),
            "compilation finished"
        );

        Ok(RunOutcome::Compiled {
            verification,
            compiled,
        })
    }
}
