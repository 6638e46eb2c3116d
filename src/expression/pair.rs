use std::fmt;
use std::iter::FusedIterator;

use super::Expression;

/// A cons cell, the building block for every compound expression
///
/// Both fields are read-only once built. Construct pairs through
/// [`Expression::cons`] or [`Expression::list`], which validate the fields.
#[derive(Clone, PartialEq)]
pub struct Pair {
    pub(super) first: Expression,
    pub(super) rest: Expression,
}

impl Pair {
    /// First value of the cell (`car`)
    pub fn first(&self) -> &Expression {
        &self.first
    }

    /// Rest value of the cell (`cdr`)
    pub fn rest(&self) -> &Expression {
        &self.rest
    }

    /// Iterates the cell as a list
    ///
    /// Follows `rest` while it is a pair. A final tail that is not the empty
    /// list is yielded as the last element, so `(1 2 . 3)` iterates as
    /// `1, 2, 3`.
    pub fn iter(&self) -> ListIter<'_> {
        ListIter {
            head: Some(&self.first),
            rest: Some(&self.rest),
        }
    }

    /// Number of elements yielded by [`Pair::iter`]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false; a pair holds at least one element
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if the chain of `rest` fields ends in the empty list
    pub fn is_proper(&self) -> bool {
        let mut rest = &self.rest;
        loop {
            match rest {
                Expression::Pair(next) => rest = &next.rest,
                Expression::EmptyList => return true,
                _ => return false,
            }
        }
    }
}

impl<'a> IntoIterator for &'a Pair {
    type Item = &'a Expression;
    type IntoIter = ListIter<'a>;

    fn into_iter(self) -> ListIter<'a> {
        self.iter()
    }
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pair({:?}, {:?})", self.first, self.rest)
    }
}

/// Iterator over the elements of a list expression
pub struct ListIter<'a> {
    head: Option<&'a Expression>,
    rest: Option<&'a Expression>,
}

impl<'a> ListIter<'a> {
    /// Iterator that yields nothing
    pub(super) fn empty() -> Self {
        ListIter {
            head: None,
            rest: None,
        }
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Expression;

    fn next(&mut self) -> Option<&'a Expression> {
        if let Some(head) = self.head.take() {
            return Some(head);
        }

        match self.rest.take()? {
            Expression::Pair(pair) => {
                self.rest = Some(&pair.rest);
                Some(&pair.first)
            }
            Expression::EmptyList => None,
            tail => Some(tail),
        }
    }
}

impl FusedIterator for ListIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Expression {
        Expression::Number(n)
    }

    #[test]
    fn test_iterates_proper_list() {
        let list = Expression::list(vec![num(1.0), num(2.0), num(3.0)]).unwrap();
        let pair = list.as_pair().unwrap();

        let items: Vec<&Expression> = pair.iter().collect();
        assert_eq!(items, vec![&num(1.0), &num(2.0), &num(3.0)]);
        assert_eq!(pair.len(), 3);
        assert!(pair.is_proper());
    }

    #[test]
    fn test_iterates_improper_tail() {
        // (1 2 . 3)
        let tail = Expression::cons(num(2.0), num(3.0)).unwrap();
        let list = Expression::cons(num(1.0), tail).unwrap();
        let pair = list.as_pair().unwrap();

        let items: Vec<Expression> = pair.iter().cloned().collect();
        assert_eq!(items, vec![num(1.0), num(2.0), num(3.0)]);
        assert_eq!(pair.len(), 3);
        assert!(!pair.is_proper());
    }

    #[test]
    fn test_single_pair_is_linked_to_empty_list() {
        let list = Expression::list(vec![num(1.0)]).unwrap();
        let pair = list.as_pair().unwrap();

        assert_eq!(pair.first(), &num(1.0));
        assert!(pair.rest().is_empty_list());
        assert_eq!(pair.len(), 1);
    }
}
