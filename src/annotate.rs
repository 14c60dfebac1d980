//! Line-number annotation of recipe sources.
//!
//! Each line becomes `{number:>5}\t{content}\n`. The number field grows past
//! five digits when it has to; it is never truncated.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{RecipeError, Result};

/// Minimum width of the line number field.
pub const LINE_NUMBER_WIDTH: usize = 5;

/// A recipe written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledRecipe {
    pub source: PathBuf,
    pub output: PathBuf,
    pub lines: usize,
}

impl CompiledRecipe {
    /// File name shared by the source and the output.
    pub fn name(&self) -> String {
        self.output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.output.to_string_lossy().to_string())
    }
}

/// Prefix every line of `content` with its 1-based line number.
///
/// Every emitted line ends in `\n`, including a final line that had no
/// terminator in the source.
pub fn number_lines(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + content.len() / 4);
    for (idx, line) in content.lines().enumerate() {
        out.push_str(&format!(
            "{:>width$}\t{}\n",
            idx + 1,
            line,
            width = LINE_NUMBER_WIDTH
        ));
    }
    out
}

/// Annotate one file, overwriting `output`. Returns the number of lines written.
pub fn annotate_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<usize> {
    let input = input.as_ref();
    let output = output.as_ref();

    let content = fs::read_to_string(input).map_err(|source| RecipeError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let numbered = number_lines(&content);

    let write_err = |source: std::io::Error| RecipeError::Write {
        path: output.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(output).map_err(write_err)?);
    writer.write_all(numbered.as_bytes()).map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    Ok(content.lines().count())
}

/// Annotate every file into `output_dir`, keeping file names.
///
/// The output directory is created first if needed. The first failure stops
/// the batch; files already written are left in place.
pub fn compile_all<P: AsRef<Path>>(files: &[P], output_dir: &Path) -> Result<Vec<CompiledRecipe>> {
    fs::create_dir_all(output_dir).map_err(|source| RecipeError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut compiled = Vec::with_capacity(files.len());
    for file in files {
        let source = file.as_ref();
        let Some(name) = source.file_name() else {
            return Err(RecipeError::Write {
                path: source.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "recipe path has no file name",
                ),
            });
        };
        let output = output_dir.join(name);
        let lines = annotate_file(source, &output)?;
        info!(file = %output.display(), lines, "compiled recipe");
        compiled.push(CompiledRecipe {
            source: source.to_path_buf(),
            output,
            lines,
        });
    }

    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_number_lines() {
        assert_eq!(
            number_lines("a\nb\nc\n"),
            "    1\ta\n    2\tb\n    3\tc\n"
        );
    }

    #[test]
    fn test_missing_final_newline_is_added() {
        assert_eq!(number_lines("a\nb"), "    1\ta\n    2\tb\n");
    }

    #[test]
    fn test_blank_lines_preserved() {
        assert_eq!(number_lines("a\n\n\nb\n"), "    1\ta\n    2\t\n    3\t\n    4\tb\n");
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(number_lines(""), "");
    }

    #[test]
    fn test_crlf_terminators() {
        assert_eq!(number_lines("a\r\nb\r\n"), "    1\ta\n    2\tb\n");
    }

    #[test]
    fn test_lone_carriage_return_is_content() {
        assert_eq!(number_lines("a\rb\n"), "    1\ta\rb\n");
    }

    #[test]
    fn test_leading_whitespace_and_tabs_kept() {
        assert_eq!(number_lines("\tindented\n  two\n"), "    1\t\tindented\n    2\t  two\n");
    }

    #[test]
    fn test_width_grows_past_five_digits() {
        let content = "x\n".repeat(100_000);
        let numbered = number_lines(&content);
        let lines: Vec<_> = numbered.lines().collect();
        assert_eq!(lines.len(), 100_000);
        assert_eq!(lines[9_999], "10000\tx");
        assert_eq!(lines[99_998], "99999\tx");
        assert_eq!(lines[99_999], "100000\tx");
    }

    #[test]
    fn test_annotate_file_overwrites() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("soup.food");
        let output = temp.path().join("out.food");
        std::fs::write(&input, "pot = new Pot()\npot.boil()").unwrap();
        std::fs::write(&output, "stale content that is much longer than the new one\n").unwrap();

        let lines = annotate_file(&input, &output).unwrap();
        assert_eq!(lines, 2);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "    1\tpot = new Pot()\n    2\tpot.boil()\n"
        );
    }

    #[test]
    fn test_compile_all_creates_nested_dir() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.food");
        let b = temp.path().join("b.food");
        std::fs::write(&a, "one\n").unwrap();
        std::fs::write(&b, "one\ntwo\n").unwrap();
        let out_dir = temp.path().join("build").join("compiled");

        let compiled = compile_all(&[&a, &b], &out_dir).unwrap();
        assert_eq!(compiled.len(), 2);
        assert_eq!(compiled[0].name(), "a.food");
        assert_eq!(compiled[1].lines, 2);
        assert_eq!(
            std::fs::read_to_string(out_dir.join("b.food")).unwrap(),
            "    1\tone\n    2\ttwo\n"
        );

        // Existing directory is fine
        compile_all(&[&a], &out_dir).unwrap();
    }

    #[test]
    fn test_compile_all_rejects_path_without_file_name() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.food");
        std::fs::write(&a, "one\n").unwrap();
        let out_dir = temp.path().join("compiled");

        let err = compile_all(&[a.as_path(), Path::new("..")], &out_dir).unwrap_err();
        assert!(matches!(err, RecipeError::Write { .. }));
        assert!(out_dir.join("a.food").exists());
    }

    #[test]
    fn test_compile_all_stops_at_first_failure() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.food");
        let missing = temp.path().join("missing.food");
        let c = temp.path().join("c.food");
        std::fs::write(&a, "one\n").unwrap();
        std::fs::write(&c, "three\n").unwrap();
        let out_dir = temp.path().join("compiled");

        let err = compile_all(&[&a, &missing, &c], &out_dir).unwrap_err();
        assert!(matches!(err, RecipeError::Read { .. }));
        assert!(out_dir.join("a.food").exists());
        assert!(!out_dir.join("c.food").exists());
    }
}
