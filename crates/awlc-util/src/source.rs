//! Source buffer: loads a source file and splits it into line slices.
//!
//! This mirrors `file.c`'s contract in the original implementation — reject
//! anything that isn't a readable regular file up front, then split on `\n`
//! once so every later stage can index lines directly instead of re-scanning
//! the raw bytes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CompileError;

/// A loaded source file, split into line slices.
///
/// The final line need not be newline-terminated; `\n` is the only line
/// separator recognised (no `\r\n` normalisation — the grammar has no string
/// literals or comments where that would matter).
pub struct SourceFile {
    path: PathBuf,
    content: String,
    lines: Vec<String>,
}

impl SourceFile {
    /// Loads `path`, rejecting missing files, unreadable files, and anything
    /// that isn't a regular file (a directory, a socket, ...).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CompileError> {
        let path = path.as_ref();

        let metadata = fs::metadata(path).map_err(|_| CompileError::NoSuchFile {
            path: path.display().to_string(),
        })?;

        if !metadata.is_file() {
            return Err(CompileError::NotARegularFile {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|_| CompileError::BadStat {
            path: path.display().to_string(),
        })?;

        let lines = content.split('\n').map(str::to_owned).collect();

        Ok(Self { path: path.to_path_buf(), content, lines })
    }

    /// Builds a `SourceFile` directly from in-memory text, labelled with a
    /// display path. Used by tests that want to compile a literal string
    /// without touching the filesystem.
    pub fn from_str(display_path: impl Into<PathBuf>, content: &str) -> Self {
        let lines = content.split('\n').map(str::to_owned).collect();
        Self { path: display_path.into(), content: content.to_owned(), lines }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full, unsplit source text, as the lexer's cursor walks it.
    pub fn source(&self) -> &str {
        &self.content
    }

    pub fn line(&self, index: u32) -> &str {
        &self.lines[index as usize]
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// The path the compiled object file is written to: the source path with
    /// a literal `.o` appended (no separator, no extension stripping).
    pub fn output_path(&self) -> PathBuf {
        let mut s = self.path.as_os_str().to_owned();
        s.push(".o");
        PathBuf::from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lines_on_newline() {
        let file = SourceFile::from_str("in.awl", "fun main() {\n}\n");
        assert_eq!(file.line_count(), 3);
        assert_eq!(file.line(0), "fun main() {");
        assert_eq!(file.line(1), "}");
        assert_eq!(file.line(2), "");
    }

    #[test]
    fn final_line_need_not_be_newline_terminated() {
        let file = SourceFile::from_str("in.awl", "fun main() { }");
        assert_eq!(file.line_count(), 1);
    }

    #[test]
    fn output_path_appends_dot_o_literally() {
        let file = SourceFile::from_str("/tmp/prog.awl", "");
        assert_eq!(file.output_path(), PathBuf::from("/tmp/prog.awl.o"));
    }

    #[test]
    fn load_rejects_missing_file() {
        let err = SourceFile::load("/nonexistent/path/to/nothing.awl").unwrap_err();
        assert!(matches!(err, CompileError::NoSuchFile { .. }));
    }

    #[test]
    fn load_rejects_directories() {
        let err = SourceFile::load(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, CompileError::NotARegularFile { .. }));
    }
}
