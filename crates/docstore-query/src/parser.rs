use crate::ast::{Comparison, Query};
use crate::error::{QueryError, QueryResult};
use crate::token::{tokenize, Token};

/// Parse a filter expression into a [`Query`].
///
/// The grammar is a flat conjunction: one or more `field op value`
/// comparisons joined by `and`. A malformed expression fails with a
/// descriptive [`QueryError`]; nothing is evaluated.
pub fn parse(input: &str) -> QueryResult<Query> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(QueryError::Empty);
    }

    let mut clauses = Vec::new();
    let mut iter = tokens.into_iter().peekable();

    loop {
        clauses.push(parse_comparison(&mut iter)?);
        match iter.next() {
            None => break,
            Some(Token::And) => {
                if iter.peek().is_none() {
                    return Err(QueryError::DanglingAnd);
                }
            }
            Some(other) => {
                return Err(QueryError::ExpectedAnd {
                    found: other.describe(),
                });
            }
        }
    }

    Ok(Query { clauses })
}

fn parse_comparison(
    iter: &mut std::iter::Peekable<std::vec::IntoIter<Token>>,
) -> QueryResult<Comparison> {
    let field = match iter.next() {
        Some(Token::Ident(name)) => name,
        Some(other) => {
            return Err(QueryError::ExpectedField {
                found: other.describe(),
            });
        }
        None => {
            return Err(QueryError::ExpectedField {
                found: "end of expression".to_string(),
            });
        }
    };

    let op = match iter.next() {
        Some(Token::Op(op)) => op,
        Some(other) => {
            return Err(QueryError::ExpectedOperator {
                field,
                found: other.describe(),
            });
        }
        None => {
            return Err(QueryError::ExpectedOperator {
                field,
                found: "end of expression".to_string(),
            });
        }
    };

    let value = match iter.next() {
        Some(Token::Literal(value)) => value,
        // A bareword on the value side is not a literal; fields compare
        // against constants only.
        Some(_) | None => return Err(QueryError::MissingValue { field }),
    };

    Ok(Comparison { field, op, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::CompareOp;
    use docstore_types::Value;

    #[test]
    fn single_clause() {
        let query = parse("test_int = 123").unwrap();
        assert_eq!(query.clauses.len(), 1);
        assert_eq!(query.clauses[0].field, "test_int");
        assert_eq!(query.clauses[0].op, CompareOp::Eq);
        assert_eq!(query.clauses[0].value, Value::Number(123.0));
    }

    #[test]
    fn conjunction_preserves_clause_order() {
        let query = parse("a > 64 and b < 128 and c = 'x'").unwrap();
        let fields: Vec<&str> = query.clauses.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn string_literal_clause() {
        let query = parse("test_string = 'hello world'").unwrap();
        assert_eq!(query.clauses[0].value, Value::from("hello world"));
    }

    #[test]
    fn empty_expression_errors() {
        assert_eq!(parse(""), Err(QueryError::Empty));
        assert_eq!(parse("   "), Err(QueryError::Empty));
    }

    #[test]
    fn missing_operator_errors() {
        let err = parse("field 123").unwrap_err();
        assert!(matches!(err, QueryError::ExpectedOperator { .. }));
    }

    #[test]
    fn missing_value_errors() {
        let err = parse("field =").unwrap_err();
        assert_eq!(
            err,
            QueryError::MissingValue {
                field: "field".into()
            }
        );
    }

    #[test]
    fn bareword_value_errors() {
        let err = parse("field = bareword").unwrap_err();
        assert!(matches!(err, QueryError::MissingValue { .. }));
    }

    #[test]
    fn dangling_and_errors() {
        assert_eq!(parse("a = 1 and"), Err(QueryError::DanglingAnd));
    }

    #[test]
    fn missing_and_between_clauses_errors() {
        let err = parse("a = 1 b = 2").unwrap_err();
        assert!(matches!(err, QueryError::ExpectedAnd { .. }));
    }

    #[test]
    fn or_is_not_a_connective() {
        // "or" lexes as an identifier, which is not valid between clauses.
        let err = parse("a = 1 or b = 2").unwrap_err();
        assert!(matches!(err, QueryError::ExpectedAnd { .. }));
    }

    #[test]
    fn parentheses_are_rejected() {
        let err = parse("(a = 1)").unwrap_err();
        assert!(matches!(err, QueryError::UnexpectedCharacter { .. }));
    }
}
