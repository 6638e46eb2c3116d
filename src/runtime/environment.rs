use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::expression::Expression;

/// Environment for variable scoping
///
/// A handle to one frame of a singly-linked scope chain. Cloning the handle
/// shares the frame: closures keep the frame they were created in alive and
/// observe later mutations of it.
///
/// A closure bound in the frame it captures forms a reference cycle. The
/// owner of the global frame breaks it with [`Environment::clear`].
#[derive(Clone)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

/// Single scope in the environment
struct Scope {
    /// Variables defined in this scope
    variables: HashMap<String, Expression>,
    /// Enclosing scope (None for global scope)
    parent: Option<Environment>,
}

impl Environment {
    /// Creates a new global environment
    pub fn new() -> Self {
        Environment {
            scope: Rc::new(RefCell::new(Scope {
                variables: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Creates an empty frame enclosed by `self`
    pub fn child(&self) -> Self {
        Environment {
            scope: Rc::new(RefCell::new(Scope {
                variables: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// The enclosing frame, if any
    pub fn parent(&self) -> Option<Environment> {
        self.scope.borrow().parent.clone()
    }

    /// True for the outermost frame
    pub fn is_global(&self) -> bool {
        self.scope.borrow().parent.is_none()
    }

    /// Binds `name` in this frame, shadowing any outer binding
    pub fn define(&self, name: impl Into<String>, value: Expression) {
        self.scope.borrow_mut().variables.insert(name.into(), value);
    }

    /// Gets the value of a variable, walking outward through enclosing frames
    pub fn get(&self, name: &str) -> Option<Expression> {
        let mut env = self.clone();
        loop {
            let parent = {
                let scope = env.scope.borrow();
                if let Some(value) = scope.variables.get(name) {
                    return Some(value.clone());
                }
                scope.parent.clone()
            };
            env = parent?;
        }
    }

    /// Binds or updates `name`
    ///
    /// Updates this frame if it already binds `name` or if it is the global
    /// frame; otherwise delegates to the enclosing frame. A new name set from
    /// an inner frame therefore lands in the global frame.
    pub fn set(&self, name: &str, value: Expression) {
        let mut env = self.clone();
        loop {
            let parent = {
                let mut scope = env.scope.borrow_mut();
                if scope.parent.is_none() || scope.variables.contains_key(name) {
                    scope.variables.insert(name.to_string(), value);
                    return;
                }
                scope.parent.clone()
            };
            match parent {
                Some(parent) => env = parent,
                None => return,
            }
        }
    }

    /// Checks if a variable exists in this frame or any enclosing frame
    pub fn has(&self, name: &str) -> bool {
        let mut env = self.clone();
        loop {
            let parent = {
                let scope = env.scope.borrow();
                if scope.variables.contains_key(name) {
                    return true;
                }
                scope.parent.clone()
            };
            match parent {
                Some(parent) => env = parent,
                None => return false,
            }
        }
    }

    /// Names bound directly in this frame, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.scope.borrow().variables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of frames from this one out to the global frame (1 for global)
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut env = self.parent();
        while let Some(parent) = env {
            depth += 1;
            env = parent.parent();
        }
        depth
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.scope, &other.scope)
    }

    /// Removes every binding of this frame
    ///
    /// Closures bound here that captured this frame keep it alive through an
    /// `Rc` cycle; clearing the frame breaks those cycles.
    pub fn clear(&self) {
        // Taken out first: dropping closures must not happen under the borrow.
        let variables = std::mem::take(&mut self.scope.borrow_mut().variables);
        drop(variables);
    }

    #[cfg(test)]
    pub(crate) fn strong_count(&self) -> usize {
        Rc::strong_count(&self.scope)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

// Bindings may hold closures over this frame, so only the shape is printed.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.names())
            .field("depth", &self.depth())
            .finish()
    }
}
