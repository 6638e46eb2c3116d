//! String tools

use crate::error::{Error, Result};
use crate::expression::Expression;
use crate::tools::{Tool, ToolRegistry};

/// Register string tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(StringAppendTool);
    registry.register(StringJoinTool);
}

/// STRING-APPEND - Concatenate the display form of every argument
///
/// Usage: `(string-append "a" 1 "b")` returns `"a1b"`
pub struct StringAppendTool;

impl Tool for StringAppendTool {
    fn name(&self) -> &str {
        "string-append"
    }

    fn description(&self) -> &str {
        "Concatenate the arguments"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        let joined: String = args.iter().map(Expression::display_string).collect();
        Ok(Expression::String(joined))
    }
}

/// STRING-JOIN - Join the elements of a list with a separator
///
/// Usage: `(string-join (list "a" "b") ", ")` returns `"a, b"`
pub struct StringJoinTool;

impl Tool for StringJoinTool {
    fn name(&self) -> &str {
        "string-join"
    }

    fn description(&self) -> &str {
        "Join list elements with a separator"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        let list = &args[0];
        if !list.is_list() {
            return Err(Error::TypeError {
                expected: "list".to_string(),
                got: list.display_string(),
            });
        }

        let joiner = args[1].as_str()?;
        let parts: Vec<String> = list.iter().map(Expression::display_string).collect();
        Ok(Expression::String(parts.join(joiner)))
    }

    fn arity(&self) -> usize {
        2
    }
}
