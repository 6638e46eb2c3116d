use super::ast::Program;
use crate::error::{Error, Result};
use crate::expression::{Expression, Keyword, Symbol};
use crate::lexer::{Token, TokenKind};

/// Recursive descent parser from tokens to expressions
///
/// Lists become right-nested pairs ending in the empty list, `'e` becomes
/// `(quote e)` with the keyword singleton, and symbol tokens spelled like a
/// keyword resolve to that keyword's singleton.
pub struct SExprParser {
    tokens: Vec<Token>,
    current: usize,
}

impl SExprParser {
    /// Creates a new parser over a token stream
    ///
    /// An `Eof` token is appended if the stream does not already end in one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().map_or(false, Token::is_eof) {
            let (line, column) = tokens.last().map_or((0, 0), |t| (t.line, t.column));
            tokens.push(Token::eof(line, column));
        }
        SExprParser { tokens, current: 0 }
    }

    /// Parses the tokens into a program
    ///
    /// A stream holding nothing but `Eof` is an error.
    pub fn parse(&mut self) -> Result<Program> {
        if self.is_at_end() {
            return Err(Error::syntax(0, 0, "Unexpected EOF"));
        }

        let mut expressions = Vec::new();
        while !self.is_at_end() {
            expressions.push(self.parse_expression()?);
        }

        Ok(Program::new(expressions))
    }

    /// Parse a single expression
    fn parse_expression(&mut self) -> Result<Expression> {
        let token = self.advance();

        match token.kind {
            TokenKind::LeftBracket => self.parse_list(),
            TokenKind::Quote => {
                let quoted = self.parse_expression()?;
                Expression::list(vec![Expression::keyword(Keyword::Quote), quoted])
            }
            TokenKind::Symbol => Ok(Expression::Symbol(Symbol::intern(&token.lexeme))),
            TokenKind::Number(n) => Ok(Expression::Number(n)),
            TokenKind::Boolean(b) => Ok(Expression::Boolean(b)),
            TokenKind::String(s) => Ok(Expression::String(s)),
            TokenKind::RightBracket => Err(Error::syntax(
                token.line,
                token.column,
                format!("Unexpected token {}", token.kind.describe()),
            )),
            TokenKind::Eof => Err(Error::syntax(token.line, token.column, "Unexpected EOF")),
        }
    }

    /// Parse the elements of a list after its opening bracket
    fn parse_list(&mut self) -> Result<Expression> {
        let mut elements = Vec::new();

        loop {
            match self.peek().kind {
                TokenKind::RightBracket => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(self.syntax_error("Unexpected EOF, expected ')'"));
                }
                _ => elements.push(self.parse_expression()?),
            }
        }

        Expression::list(elements)
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    // Never moves past the trailing Eof.
    fn advance(&mut self) -> Token {
        let token = self.tokens[self.current].clone();
        if !token.is_eof() {
            self.current += 1;
        }
        token
    }

    fn syntax_error(&self, message: impl Into<String>) -> Error {
        let token = self.peek();
        Error::syntax(token.line, token.column, message)
    }
}
