//! # Resolog
//!
//! A minimal backward-chaining logic query engine in Rust.
//!
//! ## Features
//!
//! - Unification over equality classes, including variable-to-variable
//! - Fresh variable scopes for every rule instantiation
//! - Depth-first backtracking search on an explicit work-list, with
//!   optional depth and step limits
//! - Ground queries answer true/false, others enumerate every solution
//!
//! Terms starting with an uppercase letter or `_` are variables; all other
//! terms are constants.
//!
//! ## Example
//!
//! ```rust
//! use resolog::{Answer, Engine, Fact, Rule, Solution};
//!
//! let mut engine = Engine::new();
//! engine.add_fact(Fact::new("parent", ["tom", "bob"]));
//! engine.add_fact(Fact::new("parent", ["bob", "ann"]));
//! engine.add_rule(Rule::new(
//!     Fact::new("grandparent", ["X", "Z"]),
//!     [Fact::new("parent", ["X", "Y"]), Fact::new("parent", ["Y", "Z"])],
//! ));
//!
//! let answer = engine.query(&Fact::new("grandparent", ["tom", "Q"])).unwrap();
//! assert_eq!(answer, Answer::Solutions(vec![Solution::from_iter([("Q", "ann")])]));
//! ```

/// Equality partition.
pub mod connection;
/// Query driver and engine facade.
pub mod engine;
/// Error type.
pub mod error;
/// Scopes and scope-qualified facts.
pub mod scope;
/// Backtracking search.
pub mod search;
/// Terms, facts and rules.
pub mod term;
/// Unification and rule application.
pub mod unify;

pub use connection::{Class, Connection};
pub use engine::{extract_solution, solve, Answer, Engine, Solution, ALL_DIRECTIVE};
pub use error::{Result, SearchError};
pub use scope::{Key, Scope, ScopeGen, ScopedFact};
pub use search::{Search, SearchConfig, SearchStats};
pub use term::{is_value, is_var, Fact, Rule, Term};
pub use unify::{apply_rule, unify};
