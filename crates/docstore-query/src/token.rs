use docstore_types::Value;

use crate::ast::CompareOp;
use crate::error::{QueryError, QueryResult};

/// A lexical token of the filter language.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A bareword field name.
    Ident(String),
    /// A comparison operator.
    Op(CompareOp),
    /// A literal: quoted string, number, or boolean.
    Literal(Value),
    /// The `and` keyword (case-insensitive).
    And,
}

impl Token {
    /// Short description for parse error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("identifier {name:?}"),
            Self::Op(op) => format!("operator {op}"),
            Self::Literal(v) => format!("{} literal", v.type_name()),
            Self::And => "\"and\"".to_string(),
        }
    }
}

/// Split an expression into tokens, left to right.
pub fn tokenize(input: &str) -> QueryResult<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        match c {
            _ if c.is_whitespace() => pos += 1,
            '\'' | '"' => {
                let (token, next) = lex_string(&chars, pos)?;
                tokens.push(token);
                pos = next;
            }
            '=' => {
                tokens.push(Token::Op(CompareOp::Eq));
                pos += 1;
            }
            '>' | '<' => {
                let op = if chars.get(pos + 1) == Some(&'=') {
                    pos += 2;
                    if c == '>' { CompareOp::Gte } else { CompareOp::Lte }
                } else {
                    pos += 1;
                    if c == '>' { CompareOp::Gt } else { CompareOp::Lt }
                };
                tokens.push(Token::Op(op));
            }
            _ if c.is_ascii_digit() || c == '-' => {
                let (token, next) = lex_number(&chars, pos)?;
                tokens.push(token);
                pos = next;
            }
            _ if is_word_char(c) => {
                let (token, next) = lex_word(&chars, pos);
                tokens.push(token);
                pos = next;
            }
            _ => {
                return Err(QueryError::UnexpectedCharacter {
                    character: c,
                    position: pos,
                });
            }
        }
    }

    Ok(tokens)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn lex_string(chars: &[char], start: usize) -> QueryResult<(Token, usize)> {
    let quote = chars[start];
    let mut text = String::new();
    let mut pos = start + 1;
    while pos < chars.len() {
        if chars[pos] == quote {
            return Ok((Token::Literal(Value::String(text)), pos + 1));
        }
        text.push(chars[pos]);
        pos += 1;
    }
    Err(QueryError::UnterminatedString { position: start })
}

fn lex_number(chars: &[char], start: usize) -> QueryResult<(Token, usize)> {
    let mut pos = start;
    let mut literal = String::new();
    if chars[pos] == '-' {
        literal.push('-');
        pos += 1;
    }
    while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
        literal.push(chars[pos]);
        pos += 1;
    }
    match literal.parse::<f64>() {
        Ok(n) => Ok((Token::Literal(Value::Number(n)), pos)),
        Err(_) => Err(QueryError::MalformedNumber {
            literal,
            position: start,
        }),
    }
}

fn lex_word(chars: &[char], start: usize) -> (Token, usize) {
    let mut pos = start;
    let mut word = String::new();
    while pos < chars.len() && is_word_char(chars[pos]) {
        word.push(chars[pos]);
        pos += 1;
    }
    let token = if word.eq_ignore_ascii_case("and") {
        Token::And
    } else if word == "true" {
        Token::Literal(Value::Bool(true))
    } else if word == "false" {
        Token::Literal(Value::Bool(false))
    } else {
        Token::Ident(word)
    };
    (token, pos)
}
