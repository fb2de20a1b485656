//! Filter evaluation for the in-memory store
//!
//! Supports a practical subset of document-store query operators:
//! equality, `$eq`, `$ne`, `$gt`, `$gte`, `$lt`, `$lte`, `$in`, `$nin`,
//! `$exists`, `$regex` (with `$options: "i"`), and top-level `$and` / `$or`.
//! Field names may be dotted paths into nested objects.

use super::types::Filter;
use crate::error::{Error, Result};
use crate::types::{Document, JsonObject, JsonValue};
use regex::RegexBuilder;
use std::cmp::Ordering;

/// Check whether a document satisfies a filter
pub fn matches(doc: &Document, filter: &Filter) -> Result<bool> {
    matches_object(doc, filter.as_object())
}

fn matches_object(doc: &Document, conditions: &JsonObject) -> Result<bool> {
    for (key, condition) in conditions {
        let ok = match key.as_str() {
            "$and" => all_clauses(doc, condition, "$and")?,
            "$or" => any_clause(doc, condition, "$or")?,
            op if op.starts_with('$') => {
                return Err(invalid(format!("unsupported top-level operator '{op}'")));
            }
            path => matches_field(lookup(doc, path), condition)?,
        };
        if !ok {
            return Ok(false);
        }
    }
    Ok(true)
}

fn clauses<'a>(value: &'a JsonValue, op: &str) -> Result<&'a Vec<JsonValue>> {
    value
        .as_array()
        .ok_or_else(|| invalid(format!("'{op}' expects an array of filters")))
}

fn clause_object<'a>(clause: &'a JsonValue, op: &str) -> Result<&'a JsonObject> {
    clause
        .as_object()
        .ok_or_else(|| invalid(format!("'{op}' clauses must be objects")))
}

fn all_clauses(doc: &Document, value: &JsonValue, op: &str) -> Result<bool> {
    for clause in clauses(value, op)? {
        if !matches_object(doc, clause_object(clause, op)?)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_clause(doc: &Document, value: &JsonValue, op: &str) -> Result<bool> {
    for clause in clauses(value, op)? {
        if matches_object(doc, clause_object(clause, op)?)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Resolve a dotted path inside a document
pub fn lookup<'a>(doc: &'a Document, path: &str) -> Option<&'a JsonValue> {
    let mut parts = path.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

fn matches_field(value: Option<&JsonValue>, condition: &JsonValue) -> Result<bool> {
    match condition {
        JsonValue::Object(ops) if ops.keys().any(|k| k.starts_with('$')) => {
            for (op, operand) in ops {
                if op == "$options" {
                    continue;
                }
                if !apply_operator(value, op, operand, ops)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        _ => Ok(equals(value, condition)),
    }
}

fn apply_operator(
    value: Option<&JsonValue>,
    op: &str,
    operand: &JsonValue,
    ops: &JsonObject,
) -> Result<bool> {
    let result = match op {
        "$eq" => equals(value, operand),
        "$ne" => !equals(value, operand),
        "$gt" => compares(value, operand, |o| o == Ordering::Greater),
        "$gte" => compares(value, operand, |o| o != Ordering::Less),
        "$lt" => compares(value, operand, |o| o == Ordering::Less),
        "$lte" => compares(value, operand, |o| o != Ordering::Greater),
        "$in" => clauses(operand, op)?
            .iter()
            .any(|candidate| equals(value, candidate)),
        "$nin" => !clauses(operand, op)?
            .iter()
            .any(|candidate| equals(value, candidate)),
        "$exists" => {
            let wanted = operand.as_bool().unwrap_or(!operand.is_null());
            value.is_some() == wanted
        }
        "$regex" => {
            let pattern = operand
                .as_str()
                .ok_or_else(|| invalid("'$regex' expects a string pattern"))?;
            let case_insensitive = ops
                .get("$options")
                .and_then(JsonValue::as_str)
                .is_some_and(|o| o.contains('i'));
            let re = RegexBuilder::new(pattern)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| invalid(format!("invalid '$regex': {e}")))?;
            match value {
                Some(JsonValue::String(s)) => re.is_match(s),
                Some(JsonValue::Array(items)) => items
                    .iter()
                    .any(|item| item.as_str().is_some_and(|s| re.is_match(s))),
                _ => false,
            }
        }
        other => return Err(invalid(format!("unsupported operator '{other}'"))),
    };
    Ok(result)
}

/// Equality with array-contains semantics; a missing field equals `null`
fn equals(value: Option<&JsonValue>, expected: &JsonValue) -> bool {
    match value {
        None => expected.is_null(),
        Some(actual) if actual == expected => true,
        Some(JsonValue::Array(items)) => items.iter().any(|item| item == expected),
        Some(actual) => numbers_equal(actual, expected),
    }
}

fn numbers_equal(a: &JsonValue, b: &JsonValue) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn compares(
    value: Option<&JsonValue>,
    operand: &JsonValue,
    pred: impl Fn(Ordering) -> bool,
) -> bool {
    match value {
        Some(JsonValue::Array(items)) => items
            .iter()
            .any(|item| comparable(item, operand).is_some_and(&pred)),
        Some(actual) => comparable(actual, operand).is_some_and(pred),
        None => false,
    }
}

/// Ordering between two values of the same kind; `None` across kinds
fn comparable(a: &JsonValue, b: &JsonValue) -> Option<Ordering> {
    match (a, b) {
        (JsonValue::Number(_), JsonValue::Number(_)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (JsonValue::String(x), JsonValue::String(y)) => Some(x.cmp(y)),
        (JsonValue::Bool(x), JsonValue::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Total order used for sorting: null < numbers < strings < objects < arrays < booleans
pub fn sort_order(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    fn rank(value: Option<&JsonValue>) -> u8 {
        match value {
            None | Some(JsonValue::Null) => 0,
            Some(JsonValue::Number(_)) => 1,
            Some(JsonValue::String(_)) => 2,
            Some(JsonValue::Object(_)) => 3,
            Some(JsonValue::Array(_)) => 4,
            Some(JsonValue::Bool(_)) => 5,
        }
    }

    match (a, b) {
        (Some(x), Some(y)) => comparable(x, y).unwrap_or_else(|| {
            rank(a)
                .cmp(&rank(b))
                .then_with(|| x.to_string().cmp(&y.to_string()))
        }),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::store("query", message)
}
