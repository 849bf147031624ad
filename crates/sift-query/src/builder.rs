//! Boolean query assembly.
//!
//! [`QueryBuilder`] interprets a filter document's root connectives (`and`,
//! `or`) and assembles constraint fragments into one Elasticsearch `bool`
//! query tree:
//!
//! - `and`: positive fragments pool into `must`, negative fragments into a
//!   shared `must_not` list.
//! - `or`: positive fragments go straight into `should`; each negative
//!   fragment is individually wrapped as its own `must_not` bool clause so
//!   the negated conditions stay independent alternatives rather than being
//!   ANDed together.
//!
//! Field names starting with the reserved `nested_bool` prefix carry a full
//! filter document as their value; it is translated recursively and its tree
//! is appended as one fragment.

use crate::constraint::{json_type, ConstraintKind};
use crate::error::{FilterError, Result};
use serde_json::{json, Map, Value};

/// Reserved field-name prefix marking a nested boolean sub-document.
const NESTED_BOOL_PREFIX: &str = "nested_bool";

/// Maximum number of root keys in one filter document.
const MAX_ROOT_CONDITIONS: usize = 2;

/// Translates filter documents into Elasticsearch boolean queries.
///
/// Stateless and zero-sized; construct once and call [`gen`](Self::gen) from
/// any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Translate a filter document into a query tree.
    ///
    /// `None` and JSON `null` both mean "no filter" and return an empty
    /// array rather than a `bool` tree; callers pass the result through to
    /// the search client either way.
    ///
    /// Root keys other than `and`/`or` count against the two-key limit but
    /// are not dispatched.
    pub fn gen(&self, filter: Option<&Value>) -> Result<Value> {
        let doc = match filter {
            None | Some(Value::Null) => return Ok(json!([])),
            Some(doc) => doc,
        };
        let root = doc.as_object().ok_or_else(|| {
            FilterError::format(format!("expected object, received {}", json_type(doc)))
        })?;
        if root.len() > MAX_ROOT_CONDITIONS {
            return Err(FilterError::format(
                "no more than 2 root conditions are supported",
            ));
        }

        let mut bool_query = Map::new();
        for (connective, filters) in root {
            match connective.as_str() {
                "and" => {
                    let (must, must_not) = self.and_clauses(filters)?;
                    bool_query.insert("must".to_string(), Value::Array(must));
                    bool_query.insert("must_not".to_string(), Value::Array(must_not));
                }
                "or" => {
                    let should = self.or_clauses(filters)?;
                    bool_query.insert("should".to_string(), Value::Array(should));
                }
                _ => {}
            }
        }
        Ok(json!({ "bool": bool_query }))
    }

    /// `and` connective: `must` plus one pooled `must_not` list.
    fn and_clauses(&self, filters: &Value) -> Result<(Vec<Value>, Vec<Value>)> {
        let mut must = Vec::new();
        let mut must_not = Vec::new();
        self.walk(filters, |fragment, negative| {
            if negative {
                must_not.push(fragment);
            } else {
                must.push(fragment);
            }
        })?;
        Ok((must, must_not))
    }

    /// `or` connective: one `should` list, negatives wrapped in place.
    fn or_clauses(&self, filters: &Value) -> Result<Vec<Value>> {
        let mut should = Vec::new();
        self.walk(filters, |fragment, negative| {
            if negative {
                should.push(json!({ "bool": { "must_not": fragment } }));
            } else {
                should.push(fragment);
            }
        })?;
        Ok(should)
    }

    /// Walk one connective's field map in iteration order, emitting each
    /// fragment together with its negative classification. `nested_bool`
    /// fields recurse through [`gen`](Self::gen) and always emit positive.
    fn walk<F>(&self, filters: &Value, mut emit: F) -> Result<()>
    where
        F: FnMut(Value, bool),
    {
        let fields = filters.as_object().ok_or_else(|| {
            FilterError::format(format!(
                "expected an object of field constraints, received {}",
                json_type(filters)
            ))
        })?;

        for (field, constraints) in fields {
            if field.starts_with(NESTED_BOOL_PREFIX) {
                emit(self.gen(Some(constraints))?, false);
                continue;
            }
            let constraints = constraints.as_object().ok_or_else(|| {
                FilterError::format(format!(
                    "{field}: expected an object of constraints, received {}",
                    json_type(constraints)
                ))
            })?;
            for (name, value) in constraints {
                let kind = ConstraintKind::from_name(name)
                    .ok_or_else(|| FilterError::constraint(name.as_str()))?;
                emit(kind.fragment(field, value)?, kind.is_negative());
            }
        }
        Ok(())
    }
}
