//! Filter expression language for docstore.
//!
//! Queries are a flat conjunction of field comparisons:
//!
//! ```text
//! expr       := comparison ( "and" comparison )*
//! comparison := field operator value
//! operator   := "=" | ">" | "<" | ">=" | "<="
//! value      := quoted-string | number | true | false
//! ```
//!
//! `and` is case-insensitive and the only connective; there is no `or`,
//! no negation, and no grouping. Parsing produces a [`Query`] (an ordered
//! list of [`Comparison`] clauses), which [`matches`] evaluates against an
//! object's data with a linear scan.
//!
//! # Example
//!
//! ```
//! use docstore_query::{matches, parse};
//! use docstore_types::Value;
//! use std::collections::BTreeMap;
//!
//! let query = parse("size > 10 and color = 'red'").unwrap();
//! let mut data = BTreeMap::new();
//! data.insert("size".to_string(), Value::from(42));
//! data.insert("color".to_string(), Value::from("red"));
//! assert!(matches(&data, &query));
//! ```

pub mod ast;
pub mod error;
pub mod eval;
pub mod parser;
pub mod token;

pub use ast::{CompareOp, Comparison, Query};
pub use error::{QueryError, QueryResult};
pub use eval::matches;
pub use parser::parse;
pub use token::{tokenize, Token};
