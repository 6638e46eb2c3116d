//! Type predicate tools

use crate::error::Result;
use crate::expression::Expression;
use crate::tools::{Tool, ToolRegistry};

/// Register all type predicate tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(BooleanpTool);
    registry.register(NumberpTool);
    registry.register(StringpTool);
    registry.register(SymbolpTool);
    registry.register(PairpTool);
    registry.register(ListpTool);
}

macro_rules! type_predicate_tool {
    ($name:ident, $str:expr, $desc:expr, $check:expr) => {
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
                let check: fn(&Expression) -> bool = $check;
                Ok(Expression::Boolean(check(&args[0])))
            }
            fn arity(&self) -> usize {
                1
            }
        }
    };
}

type_predicate_tool!(BooleanpTool, "boolean?", "Check if value is a boolean", |v| {
    matches!(v, Expression::Boolean(_))
});
type_predicate_tool!(NumberpTool, "number?", "Check if value is a number", |v| {
    matches!(v, Expression::Number(_))
});
type_predicate_tool!(StringpTool, "string?", "Check if value is a string", |v| {
    matches!(v, Expression::String(_))
});
type_predicate_tool!(SymbolpTool, "symbol?", "Check if value is a symbol", Expression::is_symbol);
type_predicate_tool!(PairpTool, "pair?", "Check if value is a pair", Expression::is_pair);
// Procedures count as lists here as well.
type_predicate_tool!(ListpTool, "list?", "Check if value is a list expression", Expression::is_list);
