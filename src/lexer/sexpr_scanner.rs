use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Scanner for cidlang source text
pub struct SExprScanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (0-indexed)
    line: usize,
    /// Current column number (0-indexed)
    column: usize,
    /// Position of the first character of the current token
    start_line: usize,
    start_column: usize,
}

impl SExprScanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        SExprScanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 0,
            column: 0,
            start_line: 0,
            start_column: 0,
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    ///
    /// The result always ends with exactly one [`TokenKind::Eof`].
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;
            self.scan_token()?;
        }

        self.tokens.push(Token::eof(self.line, self.column));

        Ok(std::mem::take(&mut self.tokens))
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            ' ' | '\r' | '\t' | '\n' => {}

            ';' => self.skip_line_comment(),

            '(' => self.add_token(TokenKind::LeftBracket),
            ')' => self.add_token(TokenKind::RightBracket),
            '\'' => self.add_token(TokenKind::Quote),

            '#' if self.is_at_end() => {
                return Err(self.error("Unexpected end of input after '#'"));
            }
            '#' => match self.peek() {
                't' => {
                    self.advance();
                    self.add_token(TokenKind::Boolean(true));
                }
                'f' => {
                    self.advance();
                    self.add_token(TokenKind::Boolean(false));
                }
                other => {
                    return Err(self.error(format!("Invalid boolean literal: #{}", other)));
                }
            },

            '"' => self.scan_string()?,

            '-' if self.peek().is_ascii_digit() => self.scan_number()?,
            c if c.is_ascii_digit() => self.scan_number()?,

            c if is_symbol_char(c) => {
                while is_symbol_char(self.peek()) {
                    self.advance();
                }
                self.add_token(TokenKind::Symbol);
            }

            _ => return Err(self.error(format!("Invalid character: {}", c))),
        }

        Ok(())
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn scan_string(&mut self) -> Result<()> {
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() == '\\' {
                self.advance();
                if self.is_at_end() {
                    break;
                }
                let escaped = self.advance();
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    _ => {
                        return Err(self.error(format!("Invalid escape sequence \\{}", escaped)));
                    }
                }
            } else {
                value.push(self.advance());
            }
        }

        if self.is_at_end() {
            return Err(self.error("Unterminated string"));
        }

        self.advance(); // Closing "

        self.add_token(TokenKind::String(value));
        Ok(())
    }

    fn scan_number(&mut self) -> Result<()> {
        while self.peek().is_ascii_digit() || self.peek() == '.' {
            self.advance();
        }

        let text = self.lexeme();
        let value: f64 = text
            .parse()
            .map_err(|_| self.error(format!("Invalid number: {}", text)))?;

        self.add_token(TokenKind::Number(value));
        Ok(())
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    /// Syntax error at the start of the current token
    fn error(&self, message: impl Into<String>) -> Error {
        Error::syntax(self.start_line, self.start_column, message)
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.lexeme();
        self.tokens
            .push(Token::new(kind, lexeme, self.start_line, self.start_column));
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '+' | '-' | '.' | '*' | '/' | '<' | '=' | '>' | '!' | '?' | ':' | '$' | '%' | '_' | '&' | '~' | '^'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Token> {
        SExprScanner::new(source).scan_tokens().unwrap()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(scan(""), vec![Token::eof(0, 0)]);
    }

    #[test]
    fn test_simple_sexpr() {
        let tokens = scan("(list 1 2 3)");

        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[0], Token::new(TokenKind::LeftBracket, "(", 0, 0));
        assert_eq!(tokens[1], Token::new(TokenKind::Symbol, "list", 0, 1));
        assert_eq!(tokens[2], Token::new(TokenKind::Number(1.0), "1", 0, 6));
        assert_eq!(tokens[5], Token::new(TokenKind::RightBracket, ")", 0, 11));
        assert_eq!(tokens[6], Token::eof(0, 12));
    }

    #[test]
    fn test_quote() {
        assert_eq!(
            kinds("'()"),
            vec![
                TokenKind::Quote,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds("-123.45 #t #f \"Hello World\""),
            vec![
                TokenKind::Number(-123.45),
                TokenKind::Boolean(true),
                TokenKind::Boolean(false),
                TokenKind::String("Hello World".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""a\"b\n""#)[0],
            TokenKind::String("a\"b\n".to_string())
        );
    }

    #[test]
    fn test_symbols() {
        let tokens = scan("set! - -abc <= string-append");
        let names: Vec<&str> = tokens[..5].iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(names, vec!["set!", "-", "-abc", "<=", "string-append"]);
        assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Symbol));
    }

    #[test]
    fn test_positions_across_lines() {
        let tokens = scan("(define x 1)\n  (display x)");
        let display = &tokens[6];
        assert_eq!(display.lexeme, "display");
        assert_eq!((display.line, display.column), (1, 3));
    }

    #[test]
    fn test_comment() {
        assert_eq!(
            kinds("; This is a comment\n(+ 1 2) ; trailing"),
            vec![
                TokenKind::LeftBracket,
                TokenKind::Symbol,
                TokenKind::Number(1.0),
                TokenKind::Number(2.0),
                TokenKind::RightBracket,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_syntax_errors() {
        let err = SExprScanner::new("(+ 1 @)").scan_tokens().unwrap_err();
        assert_eq!(err, Error::syntax(0, 5, "Invalid character: @"));

        let err = SExprScanner::new("\n \"open").scan_tokens().unwrap_err();
        assert_eq!(err, Error::syntax(1, 1, "Unterminated string"));

        assert!(SExprScanner::new("1.2.3").scan_tokens().is_err());
        assert!(SExprScanner::new("#x").scan_tokens().is_err());
    }

    #[test]
    fn test_trailing_hash() {
        let err = SExprScanner::new("(list 1)\n  #").scan_tokens().unwrap_err();
        assert_eq!(err, Error::syntax(1, 2, "Unexpected end of input after '#'"));

        let err = SExprScanner::new("#x").scan_tokens().unwrap_err();
        assert_eq!(err, Error::syntax(0, 0, "Invalid boolean literal: #x"));
    }
}
