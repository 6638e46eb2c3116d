use serde::{Deserialize, Serialize};

use crate::expression::Expression;

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token, with the decoded literal for literal tokens
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (0-indexed)
    pub line: usize,
    /// Column number where token starts (0-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// End-of-input marker
    pub fn eof(line: usize, column: usize) -> Self {
        Token::new(TokenKind::Eof, "", line, column)
    }

    /// Decoded literal of a number, boolean or string token
    pub fn literal(&self) -> Option<Expression> {
        match &self.kind {
            TokenKind::Number(n) => Some(Expression::Number(*n)),
            TokenKind::Boolean(b) => Some(Expression::Boolean(*b)),
            TokenKind::String(s) => Some(Expression::String(s.clone())),
            _ => None,
        }
    }

    /// True for the end-of-input marker
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// All possible token types in cidlang
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LeftBracket,
    /// `)`
    RightBracket,
    /// `'` - quote shorthand
    Quote,

    /// Symbol; the name is the lexeme
    Symbol,

    // Literals
    /// Number literal
    Number(f64),
    /// `#t` or `#f`
    Boolean(bool),
    /// String literal, quotes stripped and escapes decoded
    String(String),

    /// End of input
    Eof,
}

impl TokenKind {
    /// Human-readable name used in parser errors
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::LeftBracket => "'('",
            TokenKind::RightBracket => "')'",
            TokenKind::Quote => "quote",
            TokenKind::Symbol => "symbol",
            TokenKind::Number(_) => "number",
            TokenKind::Boolean(_) => "boolean",
            TokenKind::String(_) => "string",
            TokenKind::Eof => "end of input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(
            Token::new(TokenKind::Number(1.5), "1.5", 0, 0).literal(),
            Some(Expression::Number(1.5))
        );
        assert_eq!(
            Token::new(TokenKind::String("hi".into()), "\"hi\"", 0, 0).literal(),
            Some(Expression::string("hi"))
        );
        assert_eq!(Token::new(TokenKind::Symbol, "a", 0, 0).literal(), None);
        assert!(Token::eof(0, 0).is_eof());
    }

    #[test]
    fn test_describe() {
        assert_eq!(TokenKind::RightBracket.describe(), "')'");
        assert_eq!(TokenKind::Number(1.0).describe(), "number");
        assert_eq!(TokenKind::Eof.describe(), "end of input");
    }

    #[test]
    fn test_serde_roundtrip() {
        let token = Token::new(TokenKind::Boolean(true), "#t", 2, 4);
        let json = serde_json::to_string(&token).unwrap();
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
