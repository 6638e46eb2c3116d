use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Symbolic identifier
///
/// Ordinary symbols compare equal by name; two symbols with the same name need
/// not share an allocation. The seven keyword symbols are singletons held by a
/// process-wide registry, and a symbol is a keyword only if it *is* one of
/// those singletons.
#[derive(Clone)]
pub struct Symbol {
    name: Arc<str>,
}

/// Reserved words recognized by the evaluator as special forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `define`
    Define,
    /// `quote`
    Quote,
    /// `lambda`
    Lambda,
    /// `if`
    If,
    /// `set!`
    Set,
    /// `begin`
    Begin,
    /// `let`
    Let,
}

impl Keyword {
    /// Every keyword, in registry order
    pub const ALL: [Keyword; 7] = [
        Keyword::Define,
        Keyword::Quote,
        Keyword::Lambda,
        Keyword::If,
        Keyword::Set,
        Keyword::Begin,
        Keyword::Let,
    ];

    /// Source spelling of the keyword
    pub fn name(self) -> &'static str {
        match self {
            Keyword::Define => "define",
            Keyword::Quote => "quote",
            Keyword::Lambda => "lambda",
            Keyword::If => "if",
            Keyword::Set => "set!",
            Keyword::Begin => "begin",
            Keyword::Let => "let",
        }
    }

    /// Looks up a keyword by its source spelling
    pub fn from_name(name: &str) -> Option<Keyword> {
        Keyword::ALL.iter().copied().find(|kw| kw.name() == name)
    }

    /// The registry's singleton symbol for this keyword
    pub fn symbol(self) -> Symbol {
        KEYWORDS[self as usize].clone()
    }
}

lazy_static::lazy_static! {
    /// Keyword singletons, indexed by `Keyword as usize`. Never mutated after
    /// initialization.
    static ref KEYWORDS: [Symbol; 7] = Keyword::ALL.map(|kw| Symbol {
        name: Arc::from(kw.name()),
    });
}

impl Symbol {
    /// Creates an ordinary symbol
    ///
    /// Fails if `name` is spelled like a keyword; use [`Keyword::symbol`] to get
    /// the keyword singletons.
    pub fn new(name: &str) -> Result<Symbol> {
        if Keyword::from_name(name).is_some() {
            return Err(Error::KeywordReference {
                name: name.to_string(),
            });
        }

        Ok(Symbol {
            name: Arc::from(name),
        })
    }

    /// Resolves source text to a symbol: the keyword singleton when the text
    /// names a keyword, otherwise a fresh ordinary symbol
    pub fn intern(name: &str) -> Symbol {
        match Keyword::from_name(name) {
            Some(kw) => kw.symbol(),
            None => Symbol {
                name: Arc::from(name),
            },
        }
    }

    /// Symbol name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The keyword this symbol is, by identity with the registry singletons
    pub fn keyword(&self) -> Option<Keyword> {
        Keyword::ALL
            .iter()
            .copied()
            .find(|kw| Arc::ptr_eq(&KEYWORDS[*kw as usize].name, &self.name))
    }

    /// True if this symbol is one of the keyword singletons
    pub fn is_keyword(&self) -> bool {
        self.keyword().is_some()
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        Arc::ptr_eq(&self.name, &other.name)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Symbol {}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Symbol({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_names_are_rejected() {
        for kw in Keyword::ALL {
            let err = Symbol::new(kw.name()).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Illegal reference to keyword: {}", kw.name())
            );
        }
    }

    #[test]
    fn test_keyword_singletons() {
        let a = Keyword::Quote.symbol();
        let b = Symbol::intern("quote");
        assert!(a.ptr_eq(&b));
        assert_eq!(b.keyword(), Some(Keyword::Quote));
        assert!(b.is_keyword());
    }

    #[test]
    fn test_ordinary_symbols_compare_by_name() {
        let a = Symbol::new("a").unwrap();
        let b = Symbol::intern("a");
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert!(!a.is_keyword());
    }

    #[test]
    fn test_keyword_lookup_by_name() {
        assert_eq!(Keyword::from_name("set!"), Some(Keyword::Set));
        assert_eq!(Keyword::from_name("let"), Some(Keyword::Let));
        assert_eq!(Keyword::from_name("let*"), None);
    }
}
