//! Filter document to Elasticsearch query translation.
//!
//! Converts a compact application filter document (nested maps of
//! field -> constraint -> value) into an Elasticsearch boolean query
//! document ready to hand to a search client:
//!
//! ```
//! use serde_json::json;
//! use sift_query::QueryBuilder;
//!
//! let filter = json!({
//!     "and": {
//!         "stage": { "eq": "interview" },
//!         "modified": { "between": ["2018-01-01", "2019-01-01"] }
//!     }
//! });
//!
//! let query = QueryBuilder::new().gen(Some(&filter))?;
//! assert_eq!(
//!     query["bool"]["must"][0],
//!     json!({ "term": { "stage": "interview" } })
//! );
//! # Ok::<(), sift_query::FilterError>(())
//! ```
//!
//! The translator is pure and synchronous: no I/O, no query execution, no
//! state shared between calls. Executing the query and parsing results are
//! the caller's concern.

mod builder;
mod constraint;
mod error;

pub use builder::QueryBuilder;
pub use constraint::ConstraintKind;
pub use error::{FilterError, Result};
