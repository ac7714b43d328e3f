//! Clause evaluation against object data.
//!
//! Evaluation is infallible by design: an absent field, a type mismatch,
//! or an unsupported operator/type pairing makes the clause false rather
//! than raising an error.

use std::collections::BTreeMap;

use docstore_types::Value;

use crate::ast::{Comparison, Query};

/// Evaluate a parsed query against one object's data.
///
/// Returns `true` only if every clause is true (conjunction).
pub fn matches(data: &BTreeMap<String, Value>, query: &Query) -> bool {
    query.clauses.iter().all(|clause| eval_clause(data, clause))
}

fn eval_clause(data: &BTreeMap<String, Value>, clause: &Comparison) -> bool {
    let Some(stored) = data.get(&clause.field) else {
        return false;
    };
    match (stored, &clause.value) {
        // Numbers compare through f64; integer and float inputs unify.
        (Value::Number(stored), Value::Number(literal)) => stored
            .partial_cmp(literal)
            .is_some_and(|ordering| clause.op.accepts(ordering)),
        // Strings support the full operator set; ordering is lexicographic
        // by code point.
        (Value::String(stored), Value::String(literal)) => {
            clause.op.accepts(stored.as_str().cmp(literal.as_str()))
        }
        // Booleans support equality only.
        (Value::Bool(stored), Value::Bool(literal)) => {
            !clause.op.is_ordering() && stored == literal
        }
        // Type mismatch is a false clause, never an error.
        _ => false,
    }
}
