use crate::connection::Connection;
use crate::scope::{Key, Scope, ScopedFact};
use crate::term::Rule;
use log::trace;

/// Unifies `fact` with `query` under the equalities already in `connection`.
///
/// Returns the extended partition, or `None` if the two cannot be made
/// equal. `connection` itself is never modified.
///
/// Two occurrences of the same scoped variable (for example a fact `p(X)`
/// tried against the goal `p(X)` in the same scope) do not unify.
#[must_use]
pub fn unify<'a>(
    fact: &ScopedFact<'a>,
    query: &ScopedFact<'a>,
    connection: &Connection<'a>,
) -> Option<Connection<'a>> {
    if fact.name() != query.name() || fact.arity() != query.arity() {
        return None;
    }

    let mut extended = connection.clone();
    for (fact_arg, query_arg) in fact.args().zip(query.args()) {
        let compatible = match (fact_arg, query_arg) {
            (Key::Value(x), Key::Value(y)) => x == y,
            (Key::Var { .. }, Key::Var { .. }) => fact_arg != query_arg,
            _ => true,
        };
        if !compatible || !extended.add_equal(fact_arg, query_arg) {
            trace!("{fact} does not unify with {query}");
            return None;
        }
    }

    trace!("{fact} unifies with {query}");
    Some(extended)
}

/// Tries to use `rule` to prove `query`.
///
/// The rule is instantiated under `scope`, which must not have been used by
/// any other instantiation. On success returns the premises (sharing the
/// head's scope) still to be proven, together with the extended partition.
#[must_use]
pub fn apply_rule<'a>(
    rule: &'a Rule,
    query: &ScopedFact<'a>,
    connection: &Connection<'a>,
    scope: Scope,
) -> Option<(Vec<ScopedFact<'a>>, Connection<'a>)> {
    let head = ScopedFact::new(&rule.head, scope);
    let extended = unify(&head, query, connection)?;

    trace!("applying `{rule}` to {query} in scope {scope}");
    let premises = rule
        .body
        .iter()
        .map(|premise| ScopedFact::new(premise, scope))
        .collect();
    Some((premises, extended))
}
