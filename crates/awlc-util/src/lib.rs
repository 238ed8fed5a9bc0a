//! Shared types used by every stage of the pipeline: source spans, file
//! loading, fatal diagnostic reporting, the user-error taxonomy, and the
//! typed-index vector the analyser uses for its types/scopes/variables/
//! functions tables.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod source;
pub mod span;

pub use diagnostic::{fatal_internal, fatal_source, Level};
pub use error::CompileError;
pub use index_vec::{Idx, IndexVec};
pub use source::SourceFile;
pub use span::Span;
