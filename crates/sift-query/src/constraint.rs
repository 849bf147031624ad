//! Constraint registry.
//!
//! Maps constraint names (`eq`, `between`, `nested`, ...) to pure fragment
//! builders with the uniform signature `(field, value) -> fragment`. Each
//! fragment is one Elasticsearch query clause (`term`, `terms`, `range`,
//! `exists`, or `nested`) expressed as a `serde_json::Value`.
//!
//! The registry is a static dispatch table: constraint names resolve to a
//! [`ConstraintKind`] tag, and the tag dispatches to a handler. The
//! negative/positive classification lives on the tag itself so the boolean
//! combinator layer stays a single data-driven pass.

use crate::error::{FilterError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Enumerated constraint tag.
///
/// Resolved from the constraint-name string that appears in a filter
/// document, e.g. `{"stage": {"eq": "interview"}}` resolves to
/// [`ConstraintKind::Eq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Eq,
    Neq,
    Inq,
    Lt,
    Lte,
    Gt,
    Gte,
    Between,
    Exists,
    Missing,
    Nested,
    NestedNot,
}

impl ConstraintKind {
    /// Resolve a constraint name to its tag. Returns `None` for names with
    /// no registered handler.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "eq" => Some(Self::Eq),
            "neq" => Some(Self::Neq),
            "inq" => Some(Self::Inq),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "between" => Some(Self::Between),
            "exists" => Some(Self::Exists),
            "missing" => Some(Self::Missing),
            "nested" => Some(Self::Nested),
            "nested_not" => Some(Self::NestedNot),
            _ => None,
        }
    }

    /// Constraint name as written in filter documents.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Inq => "inq",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Between => "between",
            Self::Exists => "exists",
            Self::Missing => "missing",
            Self::Nested => "nested",
            Self::NestedNot => "nested_not",
        }
    }

    /// Whether fragments built for this constraint belong in a negated slot.
    ///
    /// Negative constraints build the same positive-shaped fragment as their
    /// counterparts (`neq` is byte-identical to `eq`); the combinator layer
    /// is responsible for placing the fragment under `must_not`. The registry
    /// has no negative fragment type. A reserved `nin` would also classify
    /// as negative, but it has no handler yet.
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::Neq | Self::Missing | Self::NestedNot)
    }

    /// Build the query fragment for this constraint on `field`.
    ///
    /// Shape validation happens here, before the fragment is handed to the
    /// caller, so a malformed value never leaks a partial clause into the
    /// assembled tree.
    pub fn fragment(&self, field: &str, value: &Value) -> Result<Value> {
        match self {
            Self::Eq | Self::Neq => Ok(term(field, value)),
            Self::Inq => terms(field, value),
            Self::Lt => Ok(range(field, "lt", value)),
            Self::Lte => Ok(range(field, "lte", value)),
            Self::Gt => Ok(range(field, "gt", value)),
            Self::Gte => Ok(range(field, "gte", value)),
            Self::Between => between(field, value),
            Self::Exists => Ok(exists(field, flag_is_set(value))),
            Self::Missing => Ok(exists(field, !flag_is_set(value))),
            Self::Nested | Self::NestedNot => nested(field, value),
        }
    }
}

/// Term equality clause: `{"term": {field: value}}`
fn term(field: &str, value: &Value) -> Value {
    json!({ "term": { field: value } })
}

/// Multi-term clause: `{"terms": {field: [values]}}`
fn terms(field: &str, values: &Value) -> Result<Value> {
    if !values.is_array() {
        return Err(FilterError::format(format!(
            "{field}: expected an array of values, received {}",
            json_type(values)
        )));
    }
    Ok(json!({ "terms": { field: values } }))
}

/// Single-bound range clause: `{"range": {field: {op: value}}}`
fn range(field: &str, op: &str, value: &Value) -> Value {
    json!({ "range": { field: { op: value } } })
}

/// Inclusive two-bound range clause.
fn between(field: &str, value: &Value) -> Result<Value> {
    match value.as_array() {
        Some(bounds) if bounds.len() == 2 => Ok(json!({
            "range": { field: { "gte": &bounds[0], "lte": &bounds[1] } }
        })),
        _ => Err(FilterError::format(format!(
            "{field}: between expects an array of [<lower>, <upper>]"
        ))),
    }
}

/// Existence clause, or its must_not-wrapped negation when `present` is
/// false.
fn exists(field: &str, present: bool) -> Value {
    let clause = json!({ "exists": { "field": field } });
    if present {
        clause
    } else {
        json!({ "bool": { "must_not": clause } })
    }
}

/// Coerce an `exists`/`missing` flag to a boolean.
///
/// Truthiness is permissive: any non-empty, non-zero value counts as set,
/// except explicit `false`, `null`, and the literal string `"false"` (flags
/// often arrive stringified from query parameters).
fn flag_is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "false",
        _ => true,
    }
}

/// Nested clause scoped to `path = field`.
///
/// Every constraint on every subfield is built against the dotted path
/// `field.subfield` and collected, in iteration order, under one conjunctive
/// `must` list.
fn nested(field: &str, subfields: &Value) -> Result<Value> {
    let Some(subfields) = subfields.as_object() else {
        return Err(FilterError::format(format!(
            "{field}: expected an object of subfield constraints, received {}",
            json_type(subfields)
        )));
    };

    let mut must = Vec::new();
    for (subfield, constraints) in subfields {
        let Some(constraints) = constraints.as_object() else {
            return Err(FilterError::format(format!(
                "{field}.{subfield}: expected an object of constraints, received {}",
                json_type(constraints)
            )));
        };
        let path = format!("{field}.{subfield}");
        for (name, value) in constraints {
            let kind = ConstraintKind::from_name(name)
                .ok_or_else(|| FilterError::constraint(name.as_str()))?;
            must.push(kind.fragment(&path, value)?);
        }
    }

    Ok(json!({
        "nested": { "path": field, "query": { "bool": { "must": must } } }
    }))
}

/// JSON type name for error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
