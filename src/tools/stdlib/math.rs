//! Arithmetic and numeric comparison tools
//!
//! All of these are binary: they read the first two arguments and ignore the
//! rest, so `(+ 10 2 100)` is `12`.

use crate::error::{Error, Result};
use crate::expression::Expression;
use crate::tools::{Tool, ToolRegistry};

/// Register math tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(AddTool);
    registry.register(SubtractTool);
    registry.register(MultiplyTool);
    registry.register(DivideTool);
    registry.register(GreaterTool);
    registry.register(LessTool);
    registry.register(GreaterOrEqualTool);
    registry.register(LessOrEqualTool);
}

fn operands(args: &[Expression]) -> Result<(f64, f64)> {
    Ok((args[0].as_number()?, args[1].as_number()?))
}

macro_rules! binary_number_tool {
    ($name:ident, $str:expr, $desc:expr, |$a:ident, $b:ident| $body:expr) => {
        #[doc = $desc]
        pub struct $name;
        impl Tool for $name {
            fn name(&self) -> &str {
                $str
            }
            fn description(&self) -> &str {
                $desc
            }
            fn execute(&self, args: &[Expression]) -> Result<Expression> {
                let ($a, $b) = operands(args)?;
                Ok(Expression::from($body))
            }
            fn arity(&self) -> usize {
                2
            }
        }
    };
}

binary_number_tool!(AddTool, "+", "Sum of two numbers", |a, b| a + b);
binary_number_tool!(SubtractTool, "-", "Difference of two numbers", |a, b| a - b);
binary_number_tool!(MultiplyTool, "*", "Product of two numbers", |a, b| a * b);
binary_number_tool!(GreaterTool, ">", "True if the first number is greater", |a, b| a > b);
binary_number_tool!(LessTool, "<", "True if the first number is smaller", |a, b| a < b);
binary_number_tool!(GreaterOrEqualTool, ">=", "True if the first number is greater or equal", |a, b| a >= b);
binary_number_tool!(LessOrEqualTool, "<=", "True if the first number is smaller or equal", |a, b| a <= b);

/// Quotient of two numbers
///
/// Usage: `(/ dividend divisor)`
/// Fails with `Dividing by zero` when either operand is zero, so `(/ 0 10)`
/// is an error too.
pub struct DivideTool;

impl Tool for DivideTool {
    fn name(&self) -> &str {
        "/"
    }

    fn description(&self) -> &str {
        "Quotient of two numbers"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        let (a, b) = operands(args)?;
        if a == 0.0 || b == 0.0 {
            return Err(Error::DivisionByZero);
        }
        Ok(Expression::Number(a / b))
    }

    fn arity(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(values: &[f64]) -> Vec<Expression> {
        values.iter().copied().map(Expression::Number).collect()
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(AddTool.execute(&nums(&[10.0, 15.0])).unwrap(), Expression::Number(25.0));
        assert_eq!(SubtractTool.execute(&nums(&[10.0, 15.0])).unwrap(), Expression::Number(-5.0));
        assert_eq!(MultiplyTool.execute(&nums(&[4.0, 2.5])).unwrap(), Expression::Number(10.0));
        assert_eq!(DivideTool.execute(&nums(&[10.0, 4.0])).unwrap(), Expression::Number(2.5));
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        assert_eq!(AddTool.execute(&nums(&[10.0, 2.0, 100.0])).unwrap(), Expression::Number(12.0));
        assert_eq!(GreaterTool.execute(&nums(&[10.0, 2.0, 100.0])).unwrap(), Expression::Boolean(true));
    }

    #[test]
    fn test_division_by_zero_either_side() {
        assert_eq!(DivideTool.execute(&nums(&[10.0, 0.0])).unwrap_err(), Error::DivisionByZero);
        assert_eq!(DivideTool.execute(&nums(&[0.0, 10.0])).unwrap_err(), Error::DivisionByZero);
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(LessTool.execute(&nums(&[1.0, 2.0])).unwrap(), Expression::Boolean(true));
        assert_eq!(GreaterOrEqualTool.execute(&nums(&[2.0, 2.0])).unwrap(), Expression::Boolean(true));
        assert_eq!(LessOrEqualTool.execute(&nums(&[3.0, 2.0])).unwrap(), Expression::Boolean(false));
    }

    #[test]
    fn test_non_numbers_are_rejected() {
        let err = AddTool
            .execute(&[Expression::string("hello"), Expression::Number(5.0)])
            .unwrap_err();
        assert_eq!(err.to_string(), "Type error: expected number, got hello");
        assert_eq!(AddTool.arity(), 2);
    }
}
