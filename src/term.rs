use smallvec::SmallVec;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Returns true if `term` names a variable.
///
/// A term is a variable when its first character is an uppercase letter or
/// an underscore (`X`, `Person`, `_tmp`). Everything else, including the
/// empty string, is a constant.
#[must_use]
pub fn is_var(term: &str) -> bool {
    term.chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c == '_')
}

/// Returns true if `term` names a constant. Exactly one of [`is_var`] and
/// `is_value` holds for any term.
#[must_use]
pub fn is_value(term: &str) -> bool {
    !is_var(term)
}

/// A single argument of a fact (e.g. `tom`, `X`)
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Term(String);

impl Term {
    /// Create a term from any string-like value
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw text of the term
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// See [`is_var`]
    #[must_use]
    pub fn is_var(&self) -> bool {
        is_var(&self.0)
    }

    /// See [`is_value`]
    #[must_use]
    pub fn is_value(&self) -> bool {
        is_value(&self.0)
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for Term {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named predicate applied to arguments (e.g. `parent(tom, bob)`)
///
/// Used both for database facts and for queries.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fact {
    /// The name of the predicate (e.g. `"parent"`)
    pub name: String,
    /// The ordered arguments
    pub args: SmallVec<[Term; 4]>,
}

impl Fact {
    /// Create a fact from a name and its arguments.
    ///
    /// ```rust
    /// use resolog::Fact;
    ///
    /// let fact = Fact::new("parent", ["tom", "bob"]);
    /// assert_eq!(fact.to_string(), "parent(tom, bob)");
    /// ```
    pub fn new<I, T>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a fact without arguments (e.g. `all`)
    pub fn atom(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: SmallVec::new(),
        }
    }

    /// Number of arguments
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// True if no argument is a variable
    #[must_use]
    pub fn is_ground(&self) -> bool {
        self.args.iter().all(Term::is_value)
    }

    /// Variables of the fact in argument order, each listed once
    pub fn variables(&self) -> impl Iterator<Item = &Term> + '_ {
        self.args
            .iter()
            .enumerate()
            .filter(|&(pos, term)| term.is_var() && !self.args[..pos].contains(term))
            .map(|(_, term)| term)
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (pos, arg) in self.args.iter().enumerate() {
            if pos > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// An inference rule (e.g. `grandparent(X, Z) :- parent(X, Y), parent(Y, Z)`)
///
/// The head holds whenever every body fact holds under one consistent
/// binding of the shared variables.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    /// The conclusion of the rule
    pub head: Fact,
    /// The premises that must all be satisfied
    pub body: Vec<Fact>,
}

impl Rule {
    /// Create a rule from its conclusion and premises
    pub fn new(head: Fact, body: impl IntoIterator<Item = Fact>) -> Self {
        Self {
            head,
            body: body.into_iter().collect(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        for (pos, premise) in self.body.iter().enumerate() {
            f.write_str(if pos == 0 { " :- " } else { ", " })?;
            write!(f, "{premise}")?;
        }
        Ok(())
    }
}
