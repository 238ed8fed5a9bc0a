//! Errors that cross the boundary into `anyhow` at the driver.
//!
//! These are the "user errors" taxonomy (§7): conditions discovered before a
//! source span exists to blame, typically while touching the filesystem.
//! Once a [`crate::source::SourceFile`] is loaded, later errors are reported
//! through [`crate::diagnostic`] instead and never return through a
//! `Result` at all.

use thiserror::Error;

/// Filesystem-level failures encountered before compilation has anything to
/// report against. `awlc-drv` wraps these in `anyhow::Error` at the CLI
/// boundary, prefixed with the program name, matching the original's
/// `err_user` convention.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{path}: no such file")]
    NoSuchFile { path: String },

    #[error("{path}: not a regular file")]
    NotARegularFile { path: String },

    #[error("{path}: could not be read")]
    BadStat { path: String },

    #[error("{path}: could not be written: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
