//! sable_core: Shared infrastructure for the sable syntax analyzer.
//!
//! Provides source-position types and string interning used by every other
//! crate in the workspace.

pub mod intern;
pub mod text;

pub use intern::{InternedString, StringInterner};
pub use text::{LineCol, LineMap, TextRange};
