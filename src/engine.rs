use crate::connection::Connection;
use crate::error::Result;
use crate::scope::{Key, Scope, ScopeGen, ScopedFact};
use crate::search::{Search, SearchConfig};
use crate::term::{Fact, Rule};
use indexmap::IndexMap;
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of the zero-argument fact that makes all queries one conjunction
pub const ALL_DIRECTIVE: &str = "all";

/// Variable bindings satisfying a query (e.g. `{Q: ann}`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Solution {
    /// Variable name as written in the query to the value it is bound to
    pub bindings: IndexMap<String, String>,
}

impl Solution {
    /// The value bound to `variable`, if any
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.bindings.get(variable).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Solution
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Result of one query (or of all queries under the `all` directive)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Answer {
    /// The query had no variables: whether it could be proven
    Truth(bool),
    /// The query had variables: every solution found, possibly none
    Solutions(Vec<Solution>),
}

impl Answer {
    /// The boolean for a ground query
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Answer::Truth(truth) => Some(*truth),
            Answer::Solutions(_) => None,
        }
    }

    /// The solutions for a query with variables
    #[must_use]
    pub fn solutions(&self) -> Option<&[Solution]> {
        match self {
            Answer::Truth(_) => None,
            Answer::Solutions(solutions) => Some(solutions.as_slice()),
        }
    }
}

/// Reads the bindings of `query`'s variables out of a satisfying partition.
///
/// Variables that ended up unbound are left out of the result.
#[must_use]
pub fn extract_solution(query: &ScopedFact<'_>, connection: &Connection<'_>) -> Solution {
    let mut solution = Solution::default();
    collect_bindings(query, connection, &mut solution);
    solution
}

fn collect_bindings(query: &ScopedFact<'_>, connection: &Connection<'_>, into: &mut Solution) {
    for variable in query.fact.variables() {
        let key = Key::new(variable.as_str(), query.scope);
        if let Some(value) = connection.value_of(&key) {
            into.bindings
                .insert(variable.as_str().to_string(), value.to_string());
        }
    }
}

/// Turns the partitions found for `queries` into an answer
fn answer(queries: &[ScopedFact<'_>], found: &[Connection<'_>]) -> Answer {
    if queries.iter().all(|query| query.fact.is_ground()) {
        return Answer::Truth(!found.is_empty());
    }

    let solutions = found
        .iter()
        .filter(|connection| !connection.is_empty())
        .map(|connection| {
            let mut solution = Solution::default();
            for query in queries {
                collect_bindings(query, connection, &mut solution);
            }
            solution
        })
        .collect();
    Answer::Solutions(solutions)
}

/// The backward-chaining query engine
#[derive(Debug, Default)]
pub struct Engine {
    facts: Vec<Fact>,
    rules: Vec<Rule>,
    config: SearchConfig,
}

impl Engine {
    /// Create an empty engine with no search limits
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine with the given limits
    #[must_use]
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create an engine over an existing database
    #[must_use]
    pub fn from_parts(facts: Vec<Fact>, rules: Vec<Rule>, config: SearchConfig) -> Self {
        Self {
            facts,
            rules,
            config,
        }
    }

    /// Add a fact to the database
    pub fn add_fact(&mut self, fact: Fact) {
        self.facts.push(fact);
    }

    /// Add a rule to the database
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Facts in insertion order
    #[must_use]
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Rules in insertion order
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Current search limits
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// True if the database holds the zero-argument `all` fact
    #[must_use]
    pub fn has_all_directive(&self) -> bool {
        self.facts
            .iter()
            .any(|fact| fact.name == ALL_DIRECTIVE && fact.args.is_empty())
    }

    /// Answers a single query on its own, ignoring the `all` directive
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`](crate::SearchError) if a search limit is
    /// exceeded.
    pub fn query(&self, query: &Fact) -> Result<Answer> {
        self.run(std::slice::from_ref(query))
    }

    /// Returns whether `query` can be proven
    ///
    /// For a query with variables this is whether any satisfying partition
    /// exists at all.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`](crate::SearchError) if a search limit is
    /// exceeded.
    pub fn ask(&self, query: &Fact) -> Result<bool> {
        let scoped = [ScopedFact::new(query, Scope(0))];
        Ok(!self.search(&scoped)?.is_empty())
    }

    /// Answers every query.
    ///
    /// Without the `all` directive each query is answered on its own and
    /// gets its own entry. With it, the queries are proven together as one
    /// conjunction and a single combined answer is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`](crate::SearchError) if a search limit is
    /// exceeded.
    pub fn solve(&self, queries: &[Fact]) -> Result<Vec<Answer>> {
        if self.has_all_directive() {
            debug!("solving {} queries jointly", queries.len());
            return Ok(vec![self.run(queries)?]);
        }
        queries.iter().map(|query| self.query(query)).collect()
    }

    /// Proves `queries` as one conjunction, query `i` in scope `i`
    fn run(&self, queries: &[Fact]) -> Result<Answer> {
        let scoped: Vec<ScopedFact<'_>> = (0u64..)
            .zip(queries)
            .map(|(index, query)| ScopedFact::new(query, Scope(index)))
            .collect();
        let found = self.search(&scoped)?;
        Ok(answer(&scoped, &found))
    }

    fn search<'a>(&'a self, goals: &[ScopedFact<'a>]) -> Result<Vec<Connection<'a>>> {
        for goal in goals {
            debug!("query {goal}");
        }
        let first_free = goals.iter().map(|goal| goal.scope.0 + 1).max().unwrap_or(0);
        let mut search = Search::new(
            &self.facts,
            &self.rules,
            self.config,
            ScopeGen::starting_at(first_free),
        );
        search.run(goals.iter().copied(), Connection::new())
    }
}

/// Answers `queries` against `facts` and `rules` with no search limits.
///
/// ```rust
/// use resolog::{solve, Answer, Fact, Rule};
///
/// let facts = vec![
///     Fact::new("parent", ["tom", "bob"]),
///     Fact::new("parent", ["bob", "ann"]),
/// ];
/// let rules = vec![Rule::new(
///     Fact::new("grandparent", ["X", "Z"]),
///     [Fact::new("parent", ["X", "Y"]), Fact::new("parent", ["Y", "Z"])],
/// )];
/// let answers = solve(facts, rules, &[Fact::new("grandparent", ["tom", "ann"])]).unwrap();
/// assert_eq!(answers, vec![Answer::Truth(true)]);
/// ```
///
/// # Errors
///
/// Never fails in practice, since no limits are set; a rule set that
/// recurses forever does not return.
pub fn solve(facts: Vec<Fact>, rules: Vec<Rule>, queries: &[Fact]) -> Result<Vec<Answer>> {
    Engine::from_parts(facts, rules, SearchConfig::default()).solve(queries)
}
