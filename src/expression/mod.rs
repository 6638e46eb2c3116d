//! Expression model shared by the parser and the evaluator
//!
//! Every runtime value is an [`Expression`]: atoms (number, string, boolean,
//! symbol), cons-cell pairs, the empty list, and the callables produced at
//! runtime (closures and host functions). Programs are data: the parser
//! produces the same pairs and symbols that `quote` hands back to the user.

mod pair;
mod symbol;

pub use pair::{ListIter, Pair};
pub use symbol::{Keyword, Symbol};

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::runtime::Procedure;
use crate::tools::Tool;

/// Runtime value representation
#[derive(Clone)]
pub enum Expression {
    // Atoms
    /// Double-precision number
    Number(f64),
    /// String value
    String(String),
    /// Boolean value
    Boolean(bool),
    /// Symbol (ordinary or keyword singleton)
    Symbol(Symbol),

    // Lists
    /// Cons cell
    Pair(Rc<Pair>),
    /// The empty list. Unit variant, so every empty list is the same value.
    EmptyList,

    // Callables
    /// Closure created by `lambda`
    Procedure(Rc<Procedure>),
    /// Function implemented by the host
    HostFunction(Arc<dyn Tool>),

    /// Result of forms evaluated only for effect (`define`, `set!`, `display`).
    /// Not a valid expression: it cannot be consed, listed or evaluated.
    Unspecified,
}

impl Expression {
    /// Creates a string value
    pub fn string(s: impl Into<String>) -> Self {
        Expression::String(s.into())
    }

    /// Creates an ordinary symbol value; fails for keyword names
    pub fn symbol(name: &str) -> Result<Self> {
        Ok(Expression::Symbol(Symbol::new(name)?))
    }

    /// The singleton symbol of a keyword
    pub fn keyword(kw: Keyword) -> Self {
        Expression::Symbol(kw.symbol())
    }

    /// Wraps a host function
    pub fn host<T: Tool + 'static>(tool: T) -> Self {
        Expression::HostFunction(Arc::new(tool))
    }

    /// Builds a pair; both fields must be valid expressions
    pub fn cons(first: Expression, rest: Expression) -> Result<Self> {
        if !first.is_expression() {
            return Err(Error::runtime(format!(
                "Illegal car expression: {}",
                first.display_string()
            )));
        }

        if !rest.is_expression() {
            return Err(Error::runtime(format!(
                "Illegal cdr expression: {}",
                rest.display_string()
            )));
        }

        Ok(Expression::Pair(Rc::new(Pair { first, rest })))
    }

    /// Builds a proper list, right-nested and terminated by the empty list
    ///
    /// Zero values yield [`Expression::EmptyList`] without allocating a pair.
    pub fn list(values: impl IntoIterator<Item = Expression>) -> Result<Self> {
        let values: Vec<Expression> = values.into_iter().collect();

        let illegal: Vec<String> = values
            .iter()
            .filter(|v| !v.is_expression())
            .map(|v| v.display_string())
            .collect();
        if !illegal.is_empty() {
            return Err(Error::runtime(format!(
                "All values must be expressions: {}",
                illegal.join(", ")
            )));
        }

        Ok(values
            .into_iter()
            .rev()
            .fold(Expression::EmptyList, |rest, first| {
                Expression::Pair(Rc::new(Pair { first, rest }))
            }))
    }

    // Predicates

    /// Number, string, boolean or symbol
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            Expression::Number(_)
                | Expression::String(_)
                | Expression::Boolean(_)
                | Expression::Symbol(_)
        )
    }

    /// A cons cell
    pub fn is_pair(&self) -> bool {
        matches!(self, Expression::Pair(_))
    }

    /// The empty list
    pub fn is_empty_list(&self) -> bool {
        matches!(self, Expression::EmptyList)
    }

    /// Pair, empty list, or procedure
    ///
    /// Procedures count as list expressions so that generic argument iteration
    /// treats them as opaque list-like values.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Expression::Pair(_) | Expression::EmptyList | Expression::Procedure(_)
        )
    }

    /// Atomic or list expression. Host functions and the unspecified value
    /// are not expressions.
    pub fn is_expression(&self) -> bool {
        self.is_atomic() || self.is_list()
    }

    /// True for any symbol, keyword or not
    pub fn is_symbol(&self) -> bool {
        matches!(self, Expression::Symbol(_))
    }

    /// True if the value is truthy in a conditional
    ///
    /// `#f`, `0`, `NaN`, the empty string and the unspecified value are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Expression::Boolean(b) => *b,
            Expression::Number(n) => *n != 0.0 && !n.is_nan(),
            Expression::String(s) => !s.is_empty(),
            Expression::Unspecified => false,
            _ => true,
        }
    }

    // Accessors

    /// The pair, if this is one
    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Expression::Pair(pair) => Some(pair),
            _ => None,
        }
    }

    /// The symbol, if this is one
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Expression::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// The number, or a type error
    pub fn as_number(&self) -> Result<f64> {
        match self {
            Expression::Number(n) => Ok(*n),
            _ => Err(Error::TypeError {
                expected: "number".to_string(),
                got: self.display_string(),
            }),
        }
    }

    /// The string, or a type error
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Expression::String(s) => Ok(s),
            _ => Err(Error::TypeError {
                expected: "string".to_string(),
                got: self.display_string(),
            }),
        }
    }

    /// Iterates a list expression; any other value yields nothing
    pub fn iter(&self) -> ListIter<'_> {
        match self {
            Expression::Pair(pair) => pair.iter(),
            _ => ListIter::empty(),
        }
    }

    /// Number of elements yielded by [`Expression::iter`]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True if [`Expression::iter`] yields nothing
    pub fn is_empty(&self) -> bool {
        !self.is_pair()
    }

    /// Copies the elements of a list expression into a vector
    pub fn to_vec(&self) -> Vec<Expression> {
        self.iter().cloned().collect()
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Expression::Number(_) => "number",
            Expression::String(_) => "string",
            Expression::Boolean(_) => "boolean",
            Expression::Symbol(_) => "symbol",
            Expression::Pair(_) => "pair",
            Expression::EmptyList => "empty-list",
            Expression::Procedure(_) => "procedure",
            Expression::HostFunction(_) => "host-function",
            Expression::Unspecified => "unspecified",
        }
    }

    /// Identity comparison: same allocation for shared values, same value for
    /// atoms. Symbols compare by name.
    pub fn ptr_eq(&self, other: &Expression) -> bool {
        match (self, other) {
            (Expression::Number(a), Expression::Number(b)) => {
                a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
            }
            (Expression::String(a), Expression::String(b)) => a == b,
            (Expression::Boolean(a), Expression::Boolean(b)) => a == b,
            (Expression::Symbol(a), Expression::Symbol(b)) => a == b,
            (Expression::Pair(a), Expression::Pair(b)) => Rc::ptr_eq(a, b),
            (Expression::EmptyList, Expression::EmptyList) => true,
            (Expression::Procedure(a), Expression::Procedure(b)) => Rc::ptr_eq(a, b),
            (Expression::HostFunction(a), Expression::HostFunction(b)) => {
                std::ptr::eq(
                    Arc::as_ptr(a) as *const (),
                    Arc::as_ptr(b) as *const (),
                )
            }
            (Expression::Unspecified, Expression::Unspecified) => true,
            _ => false,
        }
    }

    /// Display form: like the written form, but strings are emitted raw
    pub fn display_string(&self) -> String {
        match self {
            Expression::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl From<f64> for Expression {
    fn from(n: f64) -> Self {
        Expression::Number(n)
    }
}

impl From<bool> for Expression {
    fn from(b: bool) -> Self {
        Expression::Boolean(b)
    }
}

impl From<&str> for Expression {
    fn from(s: &str) -> Self {
        Expression::String(s.to_string())
    }
}

impl From<Symbol> for Expression {
    fn from(sym: Symbol) -> Self {
        Expression::Symbol(sym)
    }
}

fn write_string_literal(f: &mut fmt::Formatter, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::String(s) => write_string_literal(f, s),
            Expression::Boolean(true) => write!(f, "#t"),
            Expression::Boolean(false) => write!(f, "#f"),
            Expression::Symbol(sym) => write!(f, "{}", sym),
            Expression::Pair(pair) => {
                write!(f, "(")?;
                let mut pair: &Pair = pair;
                loop {
                    write!(f, "{}", pair.first)?;
                    match &pair.rest {
                        Expression::Pair(next) => {
                            write!(f, " ")?;
                            pair = &**next;
                        }
                        Expression::EmptyList => break,
                        tail => {
                            write!(f, " . {}", tail)?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
            Expression::EmptyList => write!(f, "()"),
            Expression::Procedure(_) => write!(f, "#procedure"),
            Expression::HostFunction(tool) => write!(f, "#<builtin {}>", tool.name()),
            Expression::Unspecified => Ok(()),
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "Number({:?})", n),
            Expression::String(s) => write!(f, "String({:?})", s),
            Expression::Boolean(b) => write!(f, "Boolean({:?})", b),
            Expression::Symbol(sym) => write!(f, "{:?}", sym),
            Expression::Pair(_) => write!(f, "List{}", self),
            Expression::EmptyList => write!(f, "EmptyList"),
            Expression::Procedure(proc) => write!(f, "{:?}", proc),
            Expression::HostFunction(tool) => write!(f, "HostFunction({})", tool.name()),
            Expression::Unspecified => write!(f, "Unspecified"),
        }
    }
}

// Structural equality. Callables compare by identity.
impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expression::Number(a), Expression::Number(b)) => a == b,
            (Expression::String(a), Expression::String(b)) => a == b,
            (Expression::Boolean(a), Expression::Boolean(b)) => a == b,
            (Expression::Symbol(a), Expression::Symbol(b)) => a == b,
            (Expression::Pair(a), Expression::Pair(b)) => Rc::ptr_eq(a, b) || a == b,
            (Expression::EmptyList, Expression::EmptyList) => true,
            (Expression::Unspecified, Expression::Unspecified) => true,
            (Expression::Procedure(_), Expression::Procedure(_))
            | (Expression::HostFunction(_), Expression::HostFunction(_)) => self.ptr_eq(other),
            _ => false,
        }
    }
}
