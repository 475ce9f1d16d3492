use crate::connection::Connection;
use crate::error::{Result, SearchError};
use crate::scope::{ScopeGen, ScopedFact};
use crate::term::{Fact, Rule};
use crate::unify::{apply_rule, unify};
use log::{debug, trace};
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Budgets for a single search.
///
/// Both limits are off by default, so a rule set that recurses forever keeps
/// the search running until memory runs out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SearchConfig {
    /// Maximum number of rule expansions nested on one branch
    pub max_depth: Option<usize>,
    /// Maximum number of goals expanded over the whole search
    pub max_steps: Option<usize>,
}

impl SearchConfig {
    /// No limits
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Set the depth limit
    #[must_use]
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Set the step limit
    #[must_use]
    pub fn with_max_steps(mut self, limit: usize) -> Self {
        self.max_steps = Some(limit);
        self
    }
}

/// Counters collected while searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Goals expanded
    pub steps: usize,
    /// Unifications attempted against database facts
    pub unifications: usize,
    /// Rules whose head unified with a goal
    pub rule_applications: usize,
    /// Satisfying partitions found
    pub solutions: usize,
    /// Deepest rule nesting reached
    pub max_depth: usize,
}

/// Goals still to prove, as a list shared between sibling branches
type Goals<'a> = Option<Rc<GoalNode<'a>>>;

#[derive(Debug)]
struct GoalNode<'a> {
    goal: ScopedFact<'a>,
    next: Goals<'a>,
}

/// Puts `front` before `rest`, keeping the order of `front`
fn prepend<'a, I>(front: I, rest: Goals<'a>) -> Goals<'a>
where
    I: IntoIterator<Item = ScopedFact<'a>>,
    I::IntoIter: DoubleEndedIterator,
{
    front
        .into_iter()
        .rev()
        .fold(rest, |next, goal| Some(Rc::new(GoalNode { goal, next })))
}

/// One pending branch of the search
#[derive(Debug)]
struct Frame<'a> {
    goals: Goals<'a>,
    connection: Connection<'a>,
    depth: usize,
}

/// Depth-first backtracking search over a fact and rule database.
///
/// Pending branches live on an explicit stack instead of the call stack.
/// Every branch owns its [`Connection`], so siblings never see each
/// other's bindings and nothing has to be undone on backtrack.
#[derive(Debug)]
pub struct Search<'a> {
    facts: &'a [Fact],
    rules: &'a [Rule],
    config: SearchConfig,
    scopes: ScopeGen,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    /// Create a search over `facts` and `rules`.
    ///
    /// Rule instantiations draw their scopes from `scopes`, which must not
    /// hand out any scope already used by the goals.
    #[must_use]
    pub fn new(
        facts: &'a [Fact],
        rules: &'a [Rule],
        config: SearchConfig,
        scopes: ScopeGen,
    ) -> Self {
        Self {
            facts,
            rules,
            config,
            scopes,
            stats: SearchStats::default(),
        }
    }

    /// Counters accumulated by all runs so far
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Finds every partition extending `connection` that satisfies all
    /// `goals`, in depth-first order.
    ///
    /// The leftmost goal is expanded first: database facts in order, then
    /// rules in order. Stored facts are tried in the goal's scope, while
    /// every rule instantiation gets a scope never seen before. Distinct
    /// proofs yielding the same bindings are all reported.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if a limit from the [`SearchConfig`] is
    /// exceeded.
    pub fn run<I>(
        &mut self,
        goals: I,
        connection: Connection<'a>,
    ) -> Result<Vec<Connection<'a>>>
    where
        I: IntoIterator<Item = ScopedFact<'a>>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut solutions = Vec::new();
        let mut stack = vec![Frame {
            goals: prepend(goals, None),
            connection,
            depth: 0,
        }];

        while let Some(Frame {
            goals,
            connection,
            depth,
        }) = stack.pop()
        {
            let Some(node) = goals else {
                self.stats.solutions += 1;
                solutions.push(connection);
                continue;
            };
            self.enter(depth)?;

            let goal = node.goal;
            trace!("expanding {goal} at depth {depth}");
            let mut children = Vec::new();

            for fact in self.facts {
                self.stats.unifications += 1;
                // Stored facts share the goal's scope.
                let candidate = ScopedFact::new(fact, goal.scope);
                if let Some(extended) = unify(&candidate, &goal, &connection) {
                    children.push(Frame {
                        goals: node.next.clone(),
                        connection: extended,
                        depth,
                    });
                }
            }

            for rule in self.rules {
                let scope = self.scopes.fresh();
                if let Some((premises, extended)) =
                    apply_rule(rule, &goal, &connection, scope)
                {
                    self.stats.rule_applications += 1;
                    children.push(Frame {
                        goals: prepend(premises, node.next.clone()),
                        connection: extended,
                        depth: depth + 1,
                    });
                }
            }

            stack.extend(children.into_iter().rev());
        }

        debug!(
            "search found {} solutions ({} steps, max depth {})",
            solutions.len(),
            self.stats.steps,
            self.stats.max_depth
        );
        Ok(solutions)
    }

    /// Accounts for one goal expansion at `depth`
    fn enter(&mut self, depth: usize) -> Result<()> {
        if let Some(limit) = self.config.max_depth {
            if depth > limit {
                return Err(SearchError::DepthLimitExceeded { limit });
            }
        }
        self.stats.steps += 1;
        if let Some(limit) = self.config.max_steps {
            if self.stats.steps > limit {
                return Err(SearchError::StepLimitExceeded { limit });
            }
        }
        self.stats.max_depth = self.stats.max_depth.max(depth);
        Ok(())
    }
}
