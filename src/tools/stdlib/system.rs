//! Output and process control tools
//!
//! Both are commonly replaced by the host: a test harness injects a capturing
//! `display`, and the REPL relies on `exit` unwinding as [`Error::Exit`].

use std::io::Write;

use crate::error::{Error, Result};
use crate::expression::Expression;
use crate::tools::{Tool, ToolRegistry};

/// Register system tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(DisplayTool);
    registry.register(ExitTool);
}

/// Render arguments the way `display` prints them: display forms, space separated
pub fn display_line(args: &[Expression]) -> String {
    args.iter()
        .map(Expression::display_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// DISPLAY - Print the arguments to stdout
pub struct DisplayTool;

impl Tool for DisplayTool {
    fn name(&self) -> &str {
        "display"
    }

    fn description(&self) -> &str {
        "Print the arguments followed by a newline"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", display_line(args))
            .map_err(|e| Error::runtime(format!("display failed: {}", e)))?;
        Ok(Expression::Unspecified)
    }
}

/// EXIT - Unwind the whole evaluation with a status code
///
/// Usage: `(exit 3)`
pub struct ExitTool;

impl Tool for ExitTool {
    fn name(&self) -> &str {
        "exit"
    }

    fn description(&self) -> &str {
        "Terminate with a status code"
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        let code = args[0].as_number()?;
        Err(Error::Exit { code: code as i32 })
    }

    fn arity(&self) -> usize {
        1
    }
}
