//! The MongoDB reference profile: a default operator set plus the two
//! boolean formatters rendering `$and`/`$or` documents.
//!
//! This module is the only place MongoDB syntax appears; everything upstream
//! assembles a representation-agnostic tree of rendered terms.

use crate::operator::Operator;

/// Build a comparison operator rendering `{ "key": { "$op": value } }`.
fn comparison(token: &'static str, mongo_op: &'static str) -> Operator {
    Operator::new(token, move |key, value| {
        format!(r#"{{ "{key}": {{ "{mongo_op}": {value} }} }}"#)
    })
}

/// Build a list operator rendering `{ "key": { "$op": [v1,v2] } }` from a
/// parenthesized value.
fn membership(token: &'static str, mongo_op: &'static str) -> Operator {
    Operator::new(token, move |key, value| {
        let items = value
            .strip_prefix('(')
            .and_then(|v| v.strip_suffix(')'))
            .unwrap_or(value);
        format!(r#"{{ "{key}": {{ "{mongo_op}": [{items}] }} }}"#)
    })
}

/// The default operator set: `==`, `!=`, `=gt=`, `=ge=`, `=lt=`, `=le=`,
/// `=in=` and `=out=`.
pub fn operators() -> Vec<Operator> {
    vec![
        comparison("==", "$eq"),
        comparison("!=", "$ne"),
        comparison("=gt=", "$gt"),
        comparison("=ge=", "$gte"),
        comparison("=lt=", "$lt"),
        comparison("=le=", "$lte"),
        membership("=in=", "$in"),
        membership("=out=", "$nin"),
    ]
}

/// AND combinator: single terms pass through unwrapped, multiple terms
/// become `{ "$and": [ ... ] }`. Never reachably invoked with zero terms,
/// which render as the empty string.
pub fn and_formatter(terms: &[String]) -> String {
    match terms {
        [] => String::new(),
        [only] => only.clone(),
        _ => format!(r#"{{ "$and": [ {} ] }}"#, terms.join(", ")),
    }
}

/// OR combinator: single terms pass through unwrapped, multiple terms
/// become `{ "$or": [ ... ] }`. An empty expression renders as the
/// match-everything filter `{ }`.
pub fn or_formatter(terms: &[String]) -> String {
    match terms {
        [] => "{ }".to_string(),
        [only] => only.clone(),
        _ => format!(r#"{{ "$or": [ {} ] }}"#, terms.join(", ")),
    }
}
