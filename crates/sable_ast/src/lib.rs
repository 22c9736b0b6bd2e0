//! sable_ast: Syntax tree definitions for the sable syntax analyzer.
//!
//! Defines the closed [`SyntaxKind`] enumeration covering every terminal and
//! nonterminal, the flag sets attached to tokens and nodes, and the node
//! types themselves. Nodes are tagged unions per grammar category with
//! arena-allocated children.

pub mod flags;
pub mod node;
pub mod syntax_kind;

pub use flags::{ModifierFlags, NodeFlags, TokenFlags};
pub use node::*;
pub use syntax_kind::SyntaxKind;
