//! # cidlang - A small Scheme dialect
//!
//! A tree-walking interpreter for a Scheme-like language built on cons cells,
//! with lexical closures and tail-call elimination.
//!
//! ## Quick Start
//!
//! Execute cidlang code from a string:
//!
//! ```rust
//! use cidlang::{Evaluator, Expression, Parser, Scanner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = r#"
//!     (define sum (lambda (a) (lambda (b) (+ a b))))
//!     (define sum2 (sum 2))
//!     (sum2 10)
//! "#;
//!
//! // Tokenize (scan)
//! let mut scanner = Scanner::new(code);
//! let tokens = scanner.scan_tokens()?;
//!
//! // Parse into expressions
//! let mut parser = Parser::new(tokens);
//! let program = parser.parse()?;
//!
//! // Execute
//! let mut evaluator = Evaluator::new();
//! let result = evaluator.execute(&program)?;
//!
//! assert_eq!(result, Expression::Number(12.0));
//! # Ok(())
//! # }
//! ```
//!
//! Or in one call, with host bindings merged into the global environment:
//!
//! ```rust
//! use std::collections::HashMap;
//! use cidlang::{exec, Expression};
//!
//! let mut bindings = HashMap::new();
//! bindings.insert("limit".to_string(), Expression::Number(3.0));
//!
//! let result = exec("(if (> limit 2) 'big 'small)", bindings).unwrap();
//! assert_eq!(result.to_string(), "big");
//! ```
//!
//! ## Language Overview
//!
//! ### Data Types
//!
//! - **Atoms**: numbers (`f64`), strings, booleans `#t`/`#f`, symbols
//! - **Lists**: cons cells ending in the empty list `()`; `(cons 1 2)` builds
//!   the dotted pair `(1 . 2)`
//! - **Procedures**: closures created by `lambda`, and host functions
//!
//! ### Special Forms
//!
//! - `(quote e)` or `'e` - `e` without evaluating it
//! - `(define name value)` / `(set! name value)` - Bind / rebind
//! - `(lambda (params...) body...)` - Closure
//! - `(if test then [else])` - Conditional
//! - `(begin e...)` - Sequence
//! - `(let ((name value)...) body...)` - Local bindings
//!
//! A list whose head is not callable evaluates to a list of its evaluated
//! elements: `(1 2 3)` is `(1 2 3)`.
//!
//! ### Built-in Functions
//!
//! - **Arithmetic**: `+ - * /` (binary)
//! - **Comparison**: `> < >= <=`
//! - **Lists**: `list car cdr cons`
//! - **Equality**: `eq? eqv? equal?`
//! - **Predicates**: `boolean? number? string? symbol? pair? list?`
//! - **Strings**: `string-append string-join`
//! - **System**: `display exit`
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → Program → Evaluator → Expression
//! ```
//!
//! - [`Scanner`] - Tokenizes source code
//! - [`Parser`] - Builds expressions from tokens
//! - [`Evaluator`] - Evaluates programs with tail-call elimination
//! - [`Expression`] - Runtime value representation
//! - [`Environment`] - Scope chain
//! - [`ToolRegistry`] - Host functions seeding the global environment
//!
//! ## Errors
//!
//! Every failure is an [`Error`]. [`Error::kind`] separates syntax errors,
//! runtime errors and the exit signal raised by `(exit code)`, which callers
//! must turn into a process exit rather than report.

pub mod error;
pub mod expression;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod tools;

use std::collections::HashMap;

// Re-export main types
pub use error::{Error, ErrorKind, Result};
pub use expression::{Expression, Keyword, ListIter, Pair, Symbol};
pub use lexer::{SExprScanner, Token, TokenKind};
pub use parser::{Program, SExprParser};
pub use runtime::{Environment, LispEvaluator, Procedure};
pub use tools::{FnTool, Tool, ToolRegistry};

/// Version of the cidlang interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Type alias for the S-expression scanner (lexer).
pub type Scanner = SExprScanner;

/// Type alias for the S-expression parser.
pub type Parser = SExprParser;

/// Type alias for the evaluator.
pub type Evaluator = LispEvaluator;

/// Type alias for the evaluator.
pub type Interpreter = LispEvaluator;

/// Tokenizes and parses source text
pub fn parse(source: &str) -> Result<Program> {
    let tokens = Scanner::new(source).scan_tokens()?;
    Parser::new(tokens).parse()
}

/// Runs source text in a fresh interpreter
///
/// `bindings` are merged into the global environment first, replacing any
/// builtin of the same name.
pub fn exec(source: &str, bindings: HashMap<String, Expression>) -> Result<Expression> {
    let mut evaluator = Evaluator::new();
    evaluator.bind_all(bindings);
    exec_in(&mut evaluator, source)
}

/// Runs source text in an existing interpreter, keeping its global state
pub fn exec_in(evaluator: &mut Evaluator, source: &str) -> Result<Expression> {
    let program = parse(source)?;
    evaluator.execute(&program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec() {
        let result = exec("(+ 10 15)", HashMap::new()).unwrap();
        assert_eq!(result, Expression::Number(25.0));
    }

    #[test]
    fn test_exec_in_keeps_state() {
        let mut evaluator = Evaluator::new();
        exec_in(&mut evaluator, "(define x 5)").unwrap();
        let result = exec_in(&mut evaluator, "(set! x (* x 2)) x").unwrap();
        assert_eq!(result, Expression::Number(10.0));
    }

    #[test]
    fn test_bindings_replace_builtins() {
        let mut bindings = HashMap::new();
        bindings.insert(
            "display".to_string(),
            Expression::host(FnTool::new("display", 0, |_| Ok(Expression::string("captured")))),
        );
        let result = exec("(display 1)", bindings).unwrap();
        assert_eq!(result, Expression::string("captured"));
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
