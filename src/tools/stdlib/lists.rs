//! List construction and access tools

use crate::error::{Error, Result};
use crate::expression::Expression;
use crate::tools::{Tool, ToolRegistry};

/// Register list tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(ListTool);
    registry.register(CarTool);
    registry.register(CdrTool);
    registry.register(ConsTool);
}

/// LIST - Build a proper list from every argument
///
/// Usage: `(list 1 2 3)` returns `(1 2 3)`; `(list)` returns `()`
pub struct ListTool;

impl Tool for ListTool {
    fn name(&self) -> &str {
        "list"
    }

    fn description(&self) -> &str {
        "Build a list from the arguments"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        Expression::list(args.iter().cloned())
    }
}

/// CAR - First element of a pair
pub struct CarTool;

impl Tool for CarTool {
    fn name(&self) -> &str {
        "car"
    }

    fn description(&self) -> &str {
        "First element of a pair"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        match args[0].as_pair() {
            Some(pair) => Ok(pair.first().clone()),
            None => Err(Error::runtime(format!(
                "Argument must be a pair expression: {}",
                args[0].display_string()
            ))),
        }
    }

    fn arity(&self) -> usize {
        1
    }
}

/// CDR - Rest of a pair
///
/// Other list expressions (the empty list, procedures) are returned unchanged.
/// For a dotted pair `(1 . 2)` the rest is the atom `2`.
pub struct CdrTool;

impl Tool for CdrTool {
    fn name(&self) -> &str {
        "cdr"
    }

    fn description(&self) -> &str {
        "Rest of a pair"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        match &args[0] {
            Expression::Pair(pair) => Ok(pair.rest().clone()),
            other if other.is_list() => Ok(other.clone()),
            other => Err(Error::runtime(format!(
                "Argument must be a list expression: {}",
                other.display_string()
            ))),
        }
    }

    fn arity(&self) -> usize {
        1
    }
}

/// CONS - Build a pair
///
/// Usage: `(cons 1 (list 2 3))` returns `(1 2 3)`; `(cons 1 2)` returns `(1 . 2)`
pub struct ConsTool;

impl Tool for ConsTool {
    fn name(&self) -> &str {
        "cons"
    }

    fn description(&self) -> &str {
        "Build a pair from two expressions"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        Expression::cons(args[0].clone(), args[1].clone())
    }

    fn arity(&self) -> usize {
        2
    }
}
