use crate::term::Fact;
use std::fmt;

/// Identifies one instantiation of a query or rule.
///
/// The same variable name under two different scopes denotes two distinct
/// variables.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
pub struct Scope(pub u64);

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out scopes that have never been used before.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeGen {
    next: u64,
}

impl ScopeGen {
    /// A generator whose first scope is `first`
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Returns a fresh scope
    pub fn fresh(&mut self) -> Scope {
        let scope = Scope(self.next);
        self.next += 1;
        scope
    }
}

/// A term qualified by its scope.
///
/// Constants are never scope-qualified, so `tom` is the same key everywhere
/// while `X` in scope 0 and `X` in scope 3 are different keys.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Key<'a> {
    /// A variable in a particular scope
    Var {
        /// The variable name as written
        name: &'a str,
        /// The scope it belongs to
        scope: Scope,
    },
    /// A constant
    Value(&'a str),
}

impl<'a> Key<'a> {
    /// Qualify `term` with `scope` if it is a variable
    #[must_use]
    pub fn new(term: &'a str, scope: Scope) -> Self {
        if crate::term::is_var(term) {
            Key::Var { name: term, scope }
        } else {
            Key::Value(term)
        }
    }

    /// True for [`Key::Var`]
    #[must_use]
    pub fn is_var(&self) -> bool {
        matches!(self, Key::Var { .. })
    }

    /// The unqualified text of the key
    #[must_use]
    pub fn name(&self) -> &'a str {
        match *self {
            Key::Var { name, .. } | Key::Value(name) => name,
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Var { name, scope } => write!(f, "{name}#{scope}"),
            Key::Value(name) => f.write_str(name),
        }
    }
}

/// A fact tagged with the scope its variables live in
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ScopedFact<'a> {
    /// The underlying fact
    pub fact: &'a Fact,
    /// The scope of its variables
    pub scope: Scope,
}

impl<'a> ScopedFact<'a> {
    /// Tag `fact` with `scope`
    #[must_use]
    pub fn new(fact: &'a Fact, scope: Scope) -> Self {
        Self { fact, scope }
    }

    /// Predicate name
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.fact.name
    }

    /// Number of arguments
    #[must_use]
    pub fn arity(&self) -> usize {
        self.fact.arity()
    }

    /// Arguments as scope-qualified keys
    pub fn args(&self) -> impl Iterator<Item = Key<'a>> + '_ {
        let (fact, scope) = (self.fact, self.scope);
        fact.args.iter().map(move |arg| Key::new(arg.as_str(), scope))
    }
}

impl fmt::Display for ScopedFact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (pos, arg) in self.args().enumerate() {
            if pos > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}
