//! Host function system for cidlang
//!
//! Builtins such as `+`, `car` and `display` are host functions: values
//! implemented in Rust that the interpreter calls with already-evaluated
//! arguments. Every host function declares a minimum arity; the interpreter
//! rejects calls that supply fewer arguments and tolerates extra ones.

pub mod stdlib;

use crate::error::Result;
use crate::expression::Expression;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Tool trait - every host function implements this
pub trait Tool: Send + Sync {
    /// Name the function is bound under in the global environment
    fn name(&self) -> &str;

    /// Tool description
    fn description(&self) -> &str;

    /// Execute the tool
    ///
    /// Called only after the interpreter has checked `args.len() >= arity()`.
    fn execute(&self, args: &[Expression]) -> Result<Expression>;

    /// Minimum number of arguments
    fn arity(&self) -> usize {
        0
    }
}

type HostFn = dyn Fn(&[Expression]) -> Result<Expression> + Send + Sync;

/// Host function backed by a closure
///
/// Used to inject host-controlled behavior (output capture, process exit)
/// without declaring a dedicated type.
///
/// ```
/// use cidlang::tools::{FnTool, Tool};
/// use cidlang::Expression;
///
/// let double = FnTool::new("double", 1, |args| {
///     Ok(Expression::Number(args[0].as_number()? * 2.0))
/// });
/// assert_eq!(double.execute(&[Expression::Number(4.0)]).unwrap(), Expression::Number(8.0));
/// ```
pub struct FnTool {
    name: String,
    description: String,
    arity: usize,
    func: Box<HostFn>,
}

impl FnTool {
    /// Creates a host function from a closure
    pub fn new<F>(name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&[Expression]) -> Result<Expression> + Send + Sync + 'static,
    {
        FnTool {
            name: name.into(),
            description: String::from("Host-provided function"),
            arity,
            func: Box::new(func),
        }
    }

    /// Replaces the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self, args: &[Expression]) -> Result<Expression> {
        (self.func)(args)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Debug for FnTool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FnTool")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Tool registry
#[derive(Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create new registry with standard library
    pub fn new() -> Self {
        let mut registry = ToolRegistry {
            tools: HashMap::new(),
        };

        stdlib::register_all(&mut registry);

        registry
    }

    /// Create empty registry (for testing)
    pub fn empty() -> Self {
        ToolRegistry {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names
    pub fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get tool count
    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Every tool paired with the name it is registered under
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Tool>)> {
        self.tools.iter().map(|(name, tool)| (name.as_str(), tool))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list_tools())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestTool;

    impl Tool for TestTool {
        fn name(&self) -> &str {
            "test"
        }

        fn description(&self) -> &str {
            "A test tool"
        }

        fn execute(&self, args: &[Expression]) -> Result<Expression> {
            if args.is_empty() {
                Ok(Expression::Number(42.0))
            } else {
                Ok(args[0].clone())
            }
        }
    }

    #[test]
    fn test_tool_registration() {
        let mut registry = ToolRegistry::empty();
        registry.register(TestTool);

        assert!(registry.has("test"));
        assert!(!registry.has("unknown"));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_tool_execution() {
        let tool = TestTool;
        assert_eq!(tool.execute(&[]).unwrap(), Expression::Number(42.0));
        assert_eq!(
            tool.execute(&[Expression::string("hello")]).unwrap(),
            Expression::string("hello")
        );
        assert_eq!(tool.arity(), 0);
    }

    #[test]
    fn test_fn_tool() {
        let tool = FnTool::new("first", 1, |args| Ok(args[0].clone()))
            .with_description("Returns its first argument");

        assert_eq!(tool.name(), "first");
        assert_eq!(tool.arity(), 1);
        assert_eq!(tool.description(), "Returns its first argument");
        assert_eq!(
            tool.execute(&[Expression::Boolean(true)]).unwrap(),
            Expression::Boolean(true)
        );
    }

    #[test]
    fn test_standard_registry_contents() {
        let registry = ToolRegistry::new();
        for name in [
            "+", "-", "*", "/", ">", "<", ">=", "<=", "list", "car", "cdr", "cons", "eq?",
            "eqv?", "equal?", "boolean?", "number?", "string?", "symbol?", "pair?", "list?",
            "string-append", "string-join", "display", "exit",
        ] {
            assert!(registry.has(name), "missing builtin {}", name);
        }
        assert_eq!(registry.count(), 25);
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = ToolRegistry::new();
        registry.register(FnTool::new("display", 0, |_| Ok(Expression::Unspecified)));
        assert_eq!(registry.count(), 25);
        assert_eq!(registry.get("display").map(|t| t.description().to_string()),
            Some("Host-provided function".to_string()));
    }
}
