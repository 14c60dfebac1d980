//! Grammar catalog loading.
//!
//! The catalog is the source of truth for every identifier a recipe may use.
//! Its on-disk shape groups names into categories for the people editing it:
//!
//! ```json
//! {
//!   "types": { "ingredients": ["Onion"], "utensils": ["Knife"] },
//!   "builtins": ["print"],
//!   "actions": { "prep": ["chop", "dice"], "heat": ["boil"] }
//! }
//! ```
//!
//! Categories carry no meaning for verification, so [`GrammarRegistry`]
//! flattens them into two sets as soon as the catalog is parsed.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::error::{RecipeError, Result};

/// Raw catalog as written by grammar authors. Every key is optional.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GrammarCatalog {
    #[serde(default)]
    pub types: Option<TypeDeclarations>,
    #[serde(default)]
    pub builtins: Vec<String>,
    /// Action methods keyed by category name
    #[serde(default)]
    pub actions: BTreeMap<String, Vec<String>>,
}

/// Constructor declarations under the `types` key.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TypeDeclarations {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub utensils: Vec<String>,
}

/// Flattened view of a catalog: every declared constructor and method name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarRegistry {
    constructors: BTreeSet<String>,
    methods: BTreeSet<String>,
}

impl GrammarRegistry {
    /// Load and flatten a catalog file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RecipeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content).map_err(|source| RecipeError::GrammarParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let catalog: GrammarCatalog = serde_json::from_str(json)?;
        Ok(Self::from_catalog(catalog))
    }

    pub fn from_catalog(catalog: GrammarCatalog) -> Self {
        let mut constructors = BTreeSet::new();
        if let Some(types) = catalog.types {
            constructors.extend(types.ingredients);
            constructors.extend(types.utensils);
        }

        let mut methods: BTreeSet<String> = catalog.builtins.into_iter().collect();
        for names in catalog.actions.into_values() {
            methods.extend(names);
        }

        Self {
            constructors,
            methods,
        }
    }

    /// All declared constructor names (ingredients and utensils).
    pub fn constructors(&self) -> &BTreeSet<String> {
        &self.constructors
    }

    /// All declared method names (builtins and every action category).
    pub fn methods(&self) -> &BTreeSet<String> {
        &self.methods
    }

    pub fn constructor_count(&self) -> usize {
        self.constructors.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}
