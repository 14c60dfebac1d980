//! Grammar completeness verification.
//!
//! Every token used by a recipe must be declared in the grammar catalog.
//! A single undeclared token fails the whole batch.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::extract::{TokenKind, TokenSite, UsedTokens};

/// Outcome of comparing used tokens against the grammar.
///
/// Missing names are sorted in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    complete: bool,
    missing_constructors: Vec<String>,
    missing_methods: Vec<String>,
}

impl VerificationResult {
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn missing_constructors(&self) -> &[String] {
        &self.missing_constructors
    }

    pub fn missing_methods(&self) -> &[String] {
        &self.missing_methods
    }

    pub fn missing_count(&self) -> usize {
        self.missing_constructors.len() + self.missing_methods.len()
    }

    /// Missing tokens paired with where each was first used.
    pub fn missing_tokens<'a>(&'a self, used: &'a UsedTokens) -> Vec<MissingToken<'a>> {
        let constructors = self
            .missing_constructors
            .iter()
            .map(|name| (TokenKind::Constructor, name));
        let methods = self
            .missing_methods
            .iter()
            .map(|name| (TokenKind::Method, name));

        constructors
            .chain(methods)
            .map(|(kind, name)| MissingToken {
                kind,
                name,
                site: used.site(kind, name),
            })
            .collect()
    }
}

/// An undeclared token and its first use, if known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingToken<'a> {
    pub kind: TokenKind,
    pub name: &'a str,
    pub site: Option<&'a TokenSite>,
}

/// Compare used tokens against declared tokens.
///
/// Constructors and methods are independent namespaces: a name declared as a
/// method does not cover its use as a constructor, and vice versa.
pub fn check(
    used_constructors: &BTreeSet<String>,
    used_methods: &BTreeSet<String>,
    declared_constructors: &BTreeSet<String>,
    declared_methods: &BTreeSet<String>,
) -> VerificationResult {
    let missing_constructors: Vec<String> = used_constructors
        .difference(declared_constructors)
        .cloned()
        .collect();
    let missing_methods: Vec<String> = used_methods.difference(declared_methods).cloned().collect();

    VerificationResult {
        complete: missing_constructors.is_empty() && missing_methods.is_empty(),
        missing_constructors,
        missing_methods,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_from_str;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_difference() {
        let result = check(&set(&["A", "B", "C"]), &set(&[]), &set(&["A", "B"]), &set(&[]));
        assert!(!result.is_complete());
        assert_eq!(result.missing_constructors(), ["C"]);
        assert!(result.missing_methods().is_empty());
    }

    #[test]
    fn test_subset_is_complete() {
        let result = check(
            &set(&["Onion"]),
            &set(&["chop"]),
            &set(&["Onion", "Garlic"]),
            &set(&["chop", "dice"]),
        );
        assert!(result.is_complete());
        assert_eq!(result.missing_count(), 0);
    }

    #[test]
    fn test_missing_sorted() {
        let result = check(
            &set(&["Zest", "Apple"]),
            &set(&["whisk", "bake", "Zap"]),
            &set(&[]),
            &set(&[]),
        );
        assert_eq!(result.missing_constructors(), ["Apple", "Zest"]);
        // Ordinal order puts uppercase before lowercase
        assert_eq!(result.missing_methods(), ["Zap", "bake", "whisk"]);
    }

    #[test]
    fn test_single_missing_method_fails() {
        let result = check(&set(&["Pot"]), &set(&["boil", "flambe"]), &set(&["Pot"]), &set(&["boil"]));
        assert!(!result.is_complete());
        assert!(result.missing_constructors().is_empty());
        assert_eq!(result.missing_methods(), ["flambe"]);
    }

    #[test]
    fn test_namespaces_are_independent() {
        // "Chop" declared only as a constructor does not cover ".Chop("
        let result = check(&set(&[]), &set(&["Chop"]), &set(&["Chop"]), &set(&[]));
        assert_eq!(result.missing_methods(), ["Chop"]);
    }

    #[test]
    fn test_empty_inputs() {
        let result = check(&set(&[]), &set(&[]), &set(&["Pot"]), &set(&["boil"]));
        assert!(result.is_complete());
    }

    #[test]
    fn test_missing_tokens_carry_sites() {
        let used = extract_from_str("p = new Pot()\np.boil()\np.flambe()\n", "dessert.food");
        let result = check(
            used.constructors(),
            used.methods(),
            &set(&[]),
            &set(&["boil"]),
        );

        let missing = result.missing_tokens(&used);
        assert_eq!(missing.len(), 2);
        assert_eq!(missing[0].kind, TokenKind::Constructor);
        assert_eq!(missing[0].name, "Pot");
        assert_eq!(missing[0].site.map(|s| s.line), Some(1));
        assert_eq!(missing[1].kind, TokenKind::Method);
        assert_eq!(missing[1].name, "flambe");
        assert_eq!(missing[1].site.map(|s| s.line), Some(3));
    }
}
