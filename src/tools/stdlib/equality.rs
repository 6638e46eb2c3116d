//! Equality predicates

use crate::error::{Error, Result};
use crate::expression::Expression;
use crate::tools::{Tool, ToolRegistry};

/// Register equality tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(EqTool);
    registry.register(EqvTool);
    registry.register(EqualTool);
}

/// Identity comparison used by `eq?` and `eqv?`
///
/// Atoms compare by value and symbols by name; pairs, procedures and host
/// functions must be the same object. Host functions and the unspecified
/// value are rejected.
pub fn is_eq(a: &Expression, b: &Expression) -> Result<bool> {
    let illegal: Vec<String> = [a, b]
        .iter()
        .filter(|v| !v.is_expression())
        .map(|v| v.display_string())
        .collect();
    if !illegal.is_empty() {
        return Err(Error::runtime(format!(
            "All arguments must be an expression: {}",
            illegal.join(", ")
        )));
    }

    Ok(a.ptr_eq(b))
}

/// Structural comparison used by `equal?`
///
/// Two pairs are equal when they iterate to the same number of pairwise
/// equal elements. An improper tail counts as the last element, so
/// `(1 . 2)` equals `(1 2)`. Everything else falls back to [`is_eq`].
pub fn is_equal(a: &Expression, b: &Expression) -> Result<bool> {
    match (a, b) {
        (Expression::Pair(x), Expression::Pair(y)) => {
            if x.len() != y.len() {
                return Ok(false);
            }
            for (left, right) in x.iter().zip(y.iter()) {
                if !is_equal(left, right)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        _ => is_eq(a, b),
    }
}

/// EQ? - Identity equality
pub struct EqTool;

impl Tool for EqTool {
    fn name(&self) -> &str {
        "eq?"
    }

    fn description(&self) -> &str {
        "Identity equality"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        Ok(Expression::Boolean(is_eq(&args[0], &args[1])?))
    }

    fn arity(&self) -> usize {
        2
    }
}

/// EQV? - Same as `eq?`; numbers already compare by value
pub struct EqvTool;

impl Tool for EqvTool {
    fn name(&self) -> &str {
        "eqv?"
    }

    fn description(&self) -> &str {
        "Equivalence (same as eq?)"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        Ok(Expression::Boolean(is_eq(&args[0], &args[1])?))
    }

    fn arity(&self) -> usize {
        2
    }
}

/// EQUAL? - Recursive structural equality
pub struct EqualTool;

impl Tool for EqualTool {
    fn name(&self) -> &str {
        "equal?"
    }

    fn description(&self) -> &str {
        "Recursive structural equality"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        Ok(Expression::Boolean(is_equal(&args[0], &args[1])?))
    }

    fn arity(&self) -> usize {
        2
    }
}
