use std::fmt;

use tracing::trace;

use crate::error::{Error, Result};
use crate::expression::Expression;
use crate::runtime::Environment;

/// Closure created by evaluating a `lambda` form
///
/// Captures the parameter list, the body sequence and the frame the `lambda`
/// was evaluated in. Immutable after creation.
pub struct Procedure {
    params: Vec<Expression>,
    body: Vec<Expression>,
    closure: Environment,
}

impl Procedure {
    /// Creates a closure. `body` must hold at least one expression.
    pub fn new(params: Vec<Expression>, body: Vec<Expression>, closure: Environment) -> Result<Self> {
        if body.is_empty() {
            return Err(Error::malformed("lambda", "body must contain at least one expression"));
        }

        Ok(Procedure {
            params,
            body,
            closure,
        })
    }

    /// Declared parameters
    pub fn params(&self) -> &[Expression] {
        &self.params
    }

    /// Body expressions, evaluated in order
    pub fn body(&self) -> &[Expression] {
        &self.body
    }

    /// Frame captured at creation
    pub fn closure(&self) -> &Environment {
        &self.closure
    }

    /// Builds the call frame for `args`
    ///
    /// The frame is enclosed by the captured environment, not the caller's.
    /// The argument count must equal the parameter count and every parameter
    /// must be a symbol.
    pub fn bind(&self, args: Vec<Expression>) -> Result<Environment> {
        if args.len() != self.params.len() {
            return Err(Error::ProcedureArity {
                expected: self.params.len(),
                received: args.len(),
            });
        }

        let frame = self.closure.child();
        for (param, arg) in self.params.iter().zip(args) {
            let name = param.as_symbol().ok_or_else(|| {
                Error::runtime(format!(
                    "All procedure parameters must be symbols: {}",
                    param.display_string()
                ))
            })?;
            trace!(param = name.name(), value = %arg, "bind");
            frame.define(name.name(), arg);
        }

        Ok(frame)
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
        write!(f, "Procedure(({}))", params.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Expression {
        Expression::symbol(name).unwrap()
    }

    #[test]
    fn test_bind_parents_call_frame_to_closure() {
        let closure = Environment::new();
        closure.define("outer", Expression::Number(1.0));
        let proc = Procedure::new(vec![sym("a"), sym("b")], vec![sym("a")], closure.clone()).unwrap();

        let frame = proc
            .bind(vec![Expression::Number(2.0), Expression::Number(3.0)])
            .unwrap();

        assert_eq!(frame.get("a"), Some(Expression::Number(2.0)));
        assert_eq!(frame.get("b"), Some(Expression::Number(3.0)));
        assert_eq!(frame.get("outer"), Some(Expression::Number(1.0)));
        assert!(frame.parent().unwrap().ptr_eq(&closure));
    }

    #[test]
    fn test_bind_requires_exact_arity() {
        let proc = Procedure::new(vec![sym("a"), sym("b")], vec![sym("a")], Environment::new()).unwrap();

        let err = proc.bind(vec![Expression::Number(1.0)]).unwrap_err();
        assert_eq!(err.to_string(), "Procedure expected 2 but got 1");

        let err = proc
            .bind(vec![Expression::Number(1.0); 3])
            .unwrap_err();
        assert_eq!(err, Error::ProcedureArity { expected: 2, received: 3 });
    }

    #[test]
    fn test_bind_requires_symbol_params() {
        let proc = Procedure::new(vec![Expression::Number(1.0)], vec![sym("a")], Environment::new()).unwrap();
        assert!(proc.bind(vec![Expression::Number(1.0)]).is_err());
    }

    #[test]
    fn test_empty_body_is_rejected() {
        assert!(Procedure::new(vec![], vec![], Environment::new()).is_err());
    }
}
