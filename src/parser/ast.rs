use std::fmt;

use crate::expression::Expression;

/// Complete cidlang program
///
/// Top-level expressions in source order. Code and data share one
/// representation, so there is no separate syntax tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level expressions in the program
    pub expressions: Vec<Expression>,
}

impl Program {
    /// Creates a program from parsed expressions
    pub fn new(expressions: Vec<Expression>) -> Self {
        Program { expressions }
    }

    /// Number of top-level expressions
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// True if the program has no expressions
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Iterates the top-level expressions
    pub fn iter(&self) -> std::slice::Iter<'_, Expression> {
        self.expressions.iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Expression;
    type IntoIter = std::slice::Iter<'a, Expression>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, expr) in self.expressions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", expr)?;
        }
        Ok(())
    }
}
