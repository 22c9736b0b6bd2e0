//! sable_scanner: Tokens, the token cursor, and the tokenizer.
//!
//! The parser consumes a [`TokenStream`] — any producer of an ordered token
//! sequence can feed it. [`Scanner`] is the built-in producer, materializing
//! the full token vector for a source text up front (template interpolation
//! boundaries already resolved).

pub mod scanner;
pub mod token;

pub use scanner::{tokenize, Scanner};
pub use token::{Position, Token, TokenStream};
