//! Token extraction from recipe sources.

mod files;
mod tokens;

pub use files::{collect_recipe_files, DEFAULT_EXTENSION};
pub use tokens::{extract_tokens, extract_from_str, TokenKind, TokenSite, UsedTokens};
