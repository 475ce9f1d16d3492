#![allow(missing_docs)]

use anyhow::Result;
use resolog::{Answer, Engine, Fact, Rule, SearchConfig, SearchError, Solution, ALL_DIRECTIVE};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn family() -> Engine {
    init_logging();
    let mut engine = Engine::new();
    engine.add_fact(Fact::new("parent", ["tom", "bob"]));
    engine.add_fact(Fact::new("parent", ["bob", "ann"]));
    engine.add_rule(Rule::new(
        Fact::new("grandparent", ["X", "Z"]),
        [
            Fact::new("parent", ["X", "Y"]),
            Fact::new("parent", ["Y", "Z"]),
        ],
    ));
    engine
}

fn solutions(pairs: &[&[(&str, &str)]]) -> Answer {
    Answer::Solutions(
        pairs
            .iter()
            .map(|bindings| bindings.iter().copied().collect())
            .collect(),
    )
}

#[test]
fn test_grandparent_is_proven() -> Result<()> {
    let answers = family().solve(&[Fact::new("grandparent", ["tom", "ann"])])?;
    assert_eq!(answers, vec![Answer::Truth(true)]);
    Ok(())
}

#[test]
fn test_grandchild_is_found() -> Result<()> {
    let answers = family().solve(&[Fact::new("grandparent", ["tom", "Q"])])?;
    assert_eq!(answers, vec![solutions(&[&[("Q", "ann")]])]);
    Ok(())
}

#[test]
fn test_unknown_ground_fact_is_false() -> Result<()> {
    let answers = family().solve(&[Fact::new("parent", ["ann", "tom"])])?;
    assert_eq!(answers, vec![Answer::Truth(false)]);
    Ok(())
}

#[test]
fn test_unsatisfiable_variable_query_is_empty() -> Result<()> {
    let answers = family().solve(&[Fact::new("sibling", ["ann", "S"])])?;
    assert_eq!(answers, vec![Answer::Solutions(Vec::new())]);
    assert_ne!(answers[0], Answer::Truth(false));
    Ok(())
}

#[test]
fn test_queries_without_directive_are_independent() -> Result<()> {
    let answers = family().solve(&[
        Fact::new("parent", ["tom", "W"]),
        Fact::new("parent", ["bob", "V"]),
    ])?;
    assert_eq!(
        answers,
        vec![
            solutions(&[&[("W", "bob")]]),
            solutions(&[&[("V", "ann")]]),
        ]
    );
    Ok(())
}

#[test]
fn test_directive_requires_joint_satisfaction() -> Result<()> {
    let mut engine = family();
    engine.add_fact(Fact::new("parent", ["bob", "liz"]));
    engine.add_fact(Fact::atom(ALL_DIRECTIVE));

    let answers = engine.solve(&[
        Fact::new("parent", ["bob", "C"]),
        Fact::new("grandparent", ["tom", "G"]),
    ])?;
    assert_eq!(
        answers,
        vec![solutions(&[
            &[("C", "ann"), ("G", "ann")],
            &[("C", "ann"), ("G", "liz")],
            &[("C", "liz"), ("G", "ann")],
            &[("C", "liz"), ("G", "liz")],
        ])]
    );

    let answers = engine.solve(&[
        Fact::new("parent", ["bob", "C"]),
        Fact::new("parent", ["ann", "D"]),
    ])?;
    assert_eq!(answers, vec![Answer::Solutions(Vec::new())]);
    Ok(())
}

#[test]
fn test_transitive_closure_with_duplicates() -> Result<()> {
    init_logging();
    let mut engine = Engine::new();
    for (from, to) in [("a", "b"), ("b", "c"), ("a", "c")] {
        engine.add_fact(Fact::new("edge", [from, to]));
    }
    engine.add_rule(Rule::new(
        Fact::new("path", ["X", "Y"]),
        [Fact::new("edge", ["X", "Y"])],
    ));
    engine.add_rule(Rule::new(
        Fact::new("path", ["X", "Z"]),
        [Fact::new("edge", ["X", "Y"]), Fact::new("path", ["Y", "Z"])],
    ));

    let answers = engine.solve(&[Fact::new("path", ["a", "T"])])?;
    // a -> c is reachable directly and through b.
    assert_eq!(
        answers,
        vec![solutions(&[&[("T", "b")], &[("T", "c")], &[("T", "c")]])]
    );
    assert!(engine.ask(&Fact::new("path", ["a", "c"]))?);
    assert!(!engine.ask(&Fact::new("path", ["c", "a"]))?);
    Ok(())
}

#[test]
fn test_variable_to_variable_chain() -> Result<()> {
    init_logging();
    let mut engine = Engine::new();
    engine.add_fact(Fact::new("name", ["alice"]));
    engine.add_rule(Rule::new(
        Fact::new("same", ["A", "A"]),
        [Fact::new("name", ["A"])],
    ));

    let answers = engine.solve(&[Fact::new("same", ["P", "Q"])])?;
    assert_eq!(answers, vec![solutions(&[&[("P", "alice"), ("Q", "alice")]])]);
    Ok(())
}

#[test]
fn test_recursion_without_base_case_hits_limit() {
    init_logging();
    let mut engine = Engine::with_config(SearchConfig::default().with_max_depth(64));
    engine.add_rule(Rule::new(
        Fact::new("forever", ["X"]),
        [Fact::new("forever", ["X"])],
    ));

    let err = engine.solve(&[Fact::new("forever", ["a"])]).unwrap_err();
    assert_eq!(err, SearchError::DepthLimitExceeded { limit: 64 });
    assert_eq!(
        err.to_string(),
        "search depth limit of 64 rule expansions exceeded"
    );
}

#[test]
fn test_solution_lookup() -> Result<()> {
    let answer = family().query(&Fact::new("parent", ["P", "ann"]))?;
    let found = answer.solutions().expect("variable query");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("P"), Some("bob"));
    assert_eq!(found[0], Solution::from_iter([("P", "bob")]));
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_answers_serialize_to_json() -> Result<()> {
    let answers = family().solve(&[
        Fact::new("grandparent", ["tom", "ann"]),
        Fact::new("grandparent", ["tom", "Q"]),
    ])?;
    let json = serde_json::to_value(&answers)?;
    assert_eq!(
        json,
        serde_json::json!([{ "Truth": true }, { "Solutions": [{ "Q": "ann" }] }])
    );

    let config: SearchConfig = serde_json::from_str(r#"{ "max_depth": 8 }"#)?;
    assert_eq!(config, SearchConfig::default().with_max_depth(8));
    Ok(())
}
