//! Fatal diagnostic reporting.
//!
//! Every diagnostic this compiler emits is fatal — there is no warning
//! level and no continuation past the first error (§7 of the spec this
//! crate implements). That makes the `Handler` type in the corpus this was
//! grounded on (which *collects* diagnostics for a caller to inspect later)
//! the wrong shape here: instead, reporting a diagnostic terminates the
//! process immediately, matching the original implementation's
//! `err_source`/`err_internal` functions.

use std::fmt;

use crate::source::SourceFile;
use crate::span::Span;

/// Severity of a diagnostic. Both variants are fatal; the distinction only
/// changes how the message is located (source span vs. compiler call site).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// The input program is ill-formed or ill-typed.
    Source,
    /// The compiler itself is in an inconsistent state.
    Internal,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Source => write!(f, "error"),
            Level::Internal => write!(f, "internal error"),
        }
    }
}

/// Prints `path:line:col: message` followed by the offending source line and
/// a caret-underline spanning `[span.first, span.last)`, then terminates the
/// process with a non-zero exit code.
///
/// Tabs in the source line are preserved as tabs in the underline offset, so
/// the underline lines up when rendered with the same tab stops as the
/// source (§6).
pub fn fatal_source(file: &SourceFile, span: Span, message: impl fmt::Display) -> ! {
    let line_num = span.line + 1;
    let col_num = span.first + 1;
    let src = file.line(span.line);

    eprintln!("{}:{}:{}: {}", file.path().display(), line_num, col_num, message);
    eprintln!("{} | {}", line_num, src);

    let gutter_width = line_num.to_string().len();
    let offset: String = src
        .chars()
        .take(span.first as usize)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    let underline_len = span.len().saturating_sub(1);
    let underline: String = std::iter::repeat('~').take(underline_len as usize).collect();

    eprintln!("{:width$} | {}^{}", "", offset, underline, width = gutter_width);

    std::process::exit(1);
}

/// Reports an internal compiler error at `location` (the call site, captured
/// via `#[track_caller]` by the [`bug!`] macro) and terminates the process.
///
/// Used for states the analyser/generator believe are unreachable — e.g. a
/// `Number` variant whose bit width doesn't match any of the four encodings
/// the code generator knows about.
#[track_caller]
pub fn fatal_internal(message: impl fmt::Display) -> ! {
    let location = std::panic::Location::caller();
    eprintln!("awlc (internal {}:{}): {}", location.file(), location.line(), message);
    std::process::exit(1);
}

/// Reports a fatal internal error with the caller's source location, mirroring
/// the original's `err_internal(fmt, ...)` macro.
#[macro_export]
macro_rules! bug {
    ($($arg:tt)*) => {
        $crate::diagnostic::fatal_internal(format!($($arg)*))
    };
}
