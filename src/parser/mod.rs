//! cidlang Parser Module
//!
//! Parses token streams into programs of S-expressions.

mod ast;
mod sexpr_parser;

pub use ast::Program;
pub use sexpr_parser::SExprParser;
