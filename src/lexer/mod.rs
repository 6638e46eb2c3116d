//! Lexical analysis for cidlang
//!
//! Converts source text into a stream of tokens with 0-indexed positions.

mod sexpr_scanner;
mod token;

pub use sexpr_scanner::SExprScanner;
pub use token::{Token, TokenKind};
