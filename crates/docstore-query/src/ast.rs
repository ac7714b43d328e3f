use std::fmt;

use serde::{Deserialize, Serialize};

use docstore_types::Value;

/// Comparison operator in a filter clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl CompareOp {
    /// The operator as written in an expression.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }

    /// Apply the operator to an ordering between stored value and literal.
    pub fn accepts(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            Self::Eq => ordering == Equal,
            Self::Gt => ordering == Greater,
            Self::Lt => ordering == Less,
            Self::Gte => matches!(ordering, Greater | Equal),
            Self::Lte => matches!(ordering, Less | Equal),
        }
    }

    /// Whether the operator is an ordering operator (anything but `=`).
    pub fn is_ordering(&self) -> bool {
        !matches!(self, Self::Eq)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter clause: `field operator value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// The data key the clause examines.
    pub field: String,
    pub op: CompareOp,
    /// The literal the stored value is compared against.
    pub value: Value,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(s) => write!(f, "{} {} '{}'", self.field, self.op, s),
            other => write!(f, "{} {} {}", self.field, self.op, other),
        }
    }
}

/// A parsed filter expression: comparisons joined by conjunction.
///
/// An object matches only if every clause is true. The clause list is
/// never empty; parsing an empty expression is an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub clauses: Vec<Comparison>,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
