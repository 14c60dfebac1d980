//! Constructor and method token extraction.
//!
//! Recipes are not parsed. Two call shapes are recognised on each line:
//!
//! - constructor: `new Onion(` - the keyword, one or more spaces, then a
//!   capitalised name
//! - method: `.chop(` - a dot, then a name starting with any letter
//!
//! Names are letters only. An identifier with a digit or underscore
//! (`new Pan2(`, `.stir_fry(`) matches neither pattern and is therefore
//! invisible to grammar verification.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{RecipeError, Result};

lazy_static! {
    static ref CONSTRUCTOR_PATTERN: Regex = Regex::new(r"new +([A-Z][a-zA-Z]*)\(").unwrap();
    static ref METHOD_PATTERN: Regex = Regex::new(r"\.([a-zA-Z][a-zA-Z]*)\(").unwrap();
}

/// Which call shape a token was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Constructor,
    Method,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Constructor => write!(f, "constructor"),
            TokenKind::Method => write!(f, "method"),
        }
    }
}

/// Where a token was first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSite {
    pub file: String,
    pub line: usize,
}

/// Identifiers used across a set of recipe sources.
///
/// Each kind is a set: repeated uses add nothing. The first site of every
/// token is kept for reporting only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedTokens {
    constructors: BTreeSet<String>,
    methods: BTreeSet<String>,
    constructor_sites: BTreeMap<String, TokenSite>,
    method_sites: BTreeMap<String, TokenSite>,
    files_scanned: usize,
}

impl UsedTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constructors(&self) -> &BTreeSet<String> {
        &self.constructors
    }

    pub fn methods(&self) -> &BTreeSet<String> {
        &self.methods
    }

    /// Number of source files that contributed to this result.
    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    /// First place `name` was used as a token of the given kind.
    pub fn site(&self, kind: TokenKind, name: &str) -> Option<&TokenSite> {
        match kind {
            TokenKind::Constructor => self.constructor_sites.get(name),
            TokenKind::Method => self.method_sites.get(name),
        }
    }

    fn record(&mut self, kind: TokenKind, name: &str, file: &str, line: usize) {
        let (set, sites) = match kind {
            TokenKind::Constructor => (&mut self.constructors, &mut self.constructor_sites),
            TokenKind::Method => (&mut self.methods, &mut self.method_sites),
        };
        if set.insert(name.to_string()) {
            sites.insert(
                name.to_string(),
                TokenSite {
                    file: file.to_string(),
                    line,
                },
            );
        }
    }

    /// Merge another result into this one. Sites already recorded here win.
    pub fn merge(&mut self, other: UsedTokens) {
        for (name, site) in other.constructor_sites {
            self.record(TokenKind::Constructor, &name, &site.file, site.line);
        }
        for (name, site) in other.method_sites {
            self.record(TokenKind::Method, &name, &site.file, site.line);
        }
        self.files_scanned += other.files_scanned;
    }
}

/// Extract tokens from a single source text. `file` labels the reported sites.
pub fn extract_from_str(content: &str, file: &str) -> UsedTokens {
    let mut used = UsedTokens::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_number = line_num + 1;
        for caps in CONSTRUCTOR_PATTERN.captures_iter(line) {
            used.record(TokenKind::Constructor, &caps[1], file, line_number);
        }
        for caps in METHOD_PATTERN.captures_iter(line) {
            used.record(TokenKind::Method, &caps[1], file, line_number);
        }
    }

    used.files_scanned = 1;
    used
}

/// Extract tokens from every file, in the order given.
pub fn extract_tokens<P: AsRef<Path>>(files: &[P]) -> Result<UsedTokens> {
    let mut used = UsedTokens::new();

    for file in files {
        let path = file.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RecipeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file_used = extract_from_str(&content, &path.to_string_lossy());
        debug!(
            file = %path.display(),
            constructors = file_used.constructors.len(),
            methods = file_used.methods.len(),
            "extracted tokens"
        );
        used.merge(file_used);
    }

    Ok(used)
}
