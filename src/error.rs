//! Error types for the cidlang interpreter

use thiserror::Error;

/// cidlang interpreter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Syntax errors
    /// Syntax error raised by the scanner or the parser
    ///
    /// **Triggered by:** Unrecognized characters, unterminated strings, unbalanced brackets
    /// **Example:** `(+ 1 2` (missing closing bracket)
    #[error("A syntax error occurred ({line}, {col}): {message}")]
    SyntaxError {
        /// Line number where error occurred (0-indexed)
        line: usize,
        /// Column number where error occurred (0-indexed)
        col: usize,
        /// Error description
        message: String,
    },

    // Runtime errors
    /// A keyword symbol was used where a value was expected
    ///
    /// **Triggered by:** Evaluating a bare keyword, or constructing an ordinary symbol
    /// with a reserved name
    /// **Example:** `define`, `(+ lambda 1)`
    #[error("Illegal reference to keyword: {name}")]
    KeywordReference {
        /// Keyword name
        name: String,
    },

    /// Reference to a symbol that is bound nowhere in the scope chain
    ///
    /// **Triggered by:** Using a variable before defining it
    /// **Example:** `x` (when x was never defined)
    /// **Prevention:** Bind variables with `(define x value)` before use
    #[error("Undefined symbol: {name}")]
    UndefinedSymbol {
        /// Symbol name
        name: String,
    },

    /// `set!` on a name that no enclosing frame binds
    ///
    /// **Example:** `(set! y 5)` without a prior `(define y ...)`
    #[error("Unable to set! on undefined symbol: {name}")]
    UndefinedAssignment {
        /// Symbol name
        name: String,
    },

    /// Host function called with fewer arguments than it declares
    ///
    /// **Example:** `(+ 10)`
    #[error(
        "Function '{name}' expects {expected} arguments but received {}{}",
        .received.len(),
        supplied_suffix(.received)
    )]
    ArityMismatch {
        /// Function name
        name: String,
        /// Minimum number of arguments
        expected: usize,
        /// Display form of every supplied argument
        received: Vec<String>,
    },

    /// Closure called with a different number of arguments than parameters
    ///
    /// **Example:** `((lambda (a b) a) 1)`
    #[error("Procedure expected {expected} but got {received}")]
    ProcedureArity {
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        received: usize,
    },

    /// Type mismatch in a builtin's argument contract
    ///
    /// **Example:** `(+ "hello" 5)`
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual value, in display form
        got: String,
    },

    /// Division where either operand is zero
    ///
    /// **Example:** `(/ 10 0)`, `(/ 0 10)`
    #[error("Dividing by zero")]
    DivisionByZero,

    /// A special form was written with the wrong shape
    ///
    /// **Example:** `(define 1 2)`, `(lambda x x)`, `(let (x) x)`
    #[error("Malformed {form} expression: {message}")]
    MalformedForm {
        /// Special form name
        form: String,
        /// What was wrong with it
        message: String,
    },

    /// Value that is neither an atomic nor a list expression
    #[error("Illegal expression. Value is not atomic or list expression: {0}")]
    IllegalExpression(String),

    /// General runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(String),

    // Control flow
    /// Raised by the `exit` builtin; carries the process status code
    ///
    /// Unwinds through every pending evaluation and must be turned into a
    /// process exit by the outermost caller instead of being printed.
    #[error("An exit code of {code} was thrown")]
    Exit {
        /// Process exit status
        code: i32,
    },
}

/// Error classification used at the CLI/REPL boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised while tokenizing or parsing; carries a source position
    Syntax,
    /// Raised while evaluating
    Runtime,
    /// The `exit` signal
    Exit,
}

fn supplied_suffix(received: &[String]) -> String {
    if received.is_empty() {
        String::new()
    } else {
        format!(": {}", received.join(", "))
    }
}

impl Error {
    /// Create a runtime error with a message
    pub fn runtime(msg: impl Into<String>) -> Self {
        Error::RuntimeError(msg.into())
    }

    /// Create a syntax error at a source position
    pub fn syntax(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::SyntaxError {
            line,
            col,
            message: msg.into(),
        }
    }

    /// Create a malformed special form error
    pub fn malformed(form: &str, msg: impl Into<String>) -> Self {
        Error::MalformedForm {
            form: form.to_string(),
            message: msg.into(),
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SyntaxError { .. } => ErrorKind::Syntax,
            Error::Exit { .. } => ErrorKind::Exit,
            _ => ErrorKind::Runtime,
        }
    }

    /// Status code carried by the exit signal, if this is one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::Exit { code } => Some(*code),
            _ => None,
        }
    }

    /// True for the `exit` signal
    pub fn is_exit(&self) -> bool {
        self.kind() == ErrorKind::Exit
    }
}

/// Result type for cidlang operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_message_without_arguments() {
        let err = Error::ArityMismatch {
            name: "+".to_string(),
            expected: 2,
            received: vec![],
        };
        assert_eq!(
            err.to_string(),
            "Function '+' expects 2 arguments but received 0"
        );
    }

    #[test]
    fn test_arity_message_lists_arguments() {
        let err = Error::ArityMismatch {
            name: "+".to_string(),
            expected: 2,
            received: vec!["10".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Function '+' expects 2 arguments but received 1: 10"
        );
    }

    #[test]
    fn test_syntax_error_position() {
        let err = Error::syntax(3, 7, "Invalid character: @");
        assert_eq!(
            err.to_string(),
            "A syntax error occurred (3, 7): Invalid character: @"
        );
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Error::Exit { code: 3 }.kind(), ErrorKind::Exit);
        assert_eq!(Error::Exit { code: 3 }.exit_code(), Some(3));
        assert_eq!(Error::DivisionByZero.kind(), ErrorKind::Runtime);
        assert_eq!(Error::DivisionByZero.exit_code(), None);
        assert!(!Error::runtime("boom").is_exit());
    }
}
