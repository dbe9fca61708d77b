// VM Parser: strips comments, tokenizes, and builds nested blocks from tank program source

use super::error::{ParseError, ParseErrorKind};
use super::value::Value;
use std::fmt;

/// A parsed program: top-level values in source order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub values: Vec<Value>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// Remove `( ... )` comments, keeping the `source` offset of every byte that
/// survives. An opening paren with no closing one is ordinary text.
fn strip_comments(source: &str) -> (String, Vec<usize>) {
    let mut text = String::with_capacity(source.len());
    let mut offsets = Vec::with_capacity(source.len());
    let mut comment_end: Option<usize> = None;

    for (i, c) in source.char_indices() {
        if let Some(end) = comment_end {
            if i <= end {
                continue;
            }
            comment_end = None;
        }
        if c == '(' {
            if let Some(end) = source[i..].find(')') {
                comment_end = Some(i + end);
                continue;
            }
        }
        text.push(c);
        offsets.extend(i..i + c.len_utf8());
    }
    (text, offsets)
}

/// Split comment-free text into (byte offset, token) pairs.
/// Braces are always tokens of their own.
fn tokenize(text: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() || c == '{' || c == '}' {
            if let Some(s) = start.take() {
                tokens.push((s, &text[s..i]));
            }
            if c != '{' && c != '}' {
                continue;
            }
            tokens.push((i, &text[i..i + 1]));
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push((s, &text[s..]));
    }
    tokens
}

/// A token is a number only if it is the canonical spelling of an integer
fn parse_number(token: &str) -> Option<f64> {
    let n = token.parse::<i64>().ok()?;
    (n.to_string() == token).then_some(n as f64)
}

/// Parses tank program source into a `Program`
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    // Open blocks: brace offset plus the enclosing sequence being built
    let mut open: Vec<(usize, Vec<Value>)> = Vec::new();
    let mut current: Vec<Value> = Vec::new();

    let (text, offsets) = strip_comments(source);
    for (offset, token) in tokenize(&text) {
        let offset = offsets[offset];
        match token {
            "{" => {
                open.push((offset, std::mem::take(&mut current)));
            }
            "}" => {
                let (_, mut enclosing) = open.pop().ok_or(ParseError {
                    position: offset,
                    kind: ParseErrorKind::UnexpectedClose,
                })?;
                enclosing.push(Value::Block(std::mem::take(&mut current)));
                current = enclosing;
            }
            _ => match parse_number(token) {
                Some(n) => current.push(Value::Number(n)),
                None => current.push(Value::Word(token.to_string())),
            },
        }
    }

    if let Some((position, _)) = open.pop() {
        return Err(ParseError {
            position,
            kind: ParseErrorKind::UnclosedBlock,
        });
    }
    Ok(Program { values: current })
}

/// Keep at most `max_len` non-whitespace characters of `source`; 0 means no limit
pub fn truncate_program(source: &str, max_len: usize) -> &str {
    if max_len == 0 {
        return source;
    }
    let mut counted = 0;
    for (i, c) in source.char_indices() {
        if !c.is_whitespace() {
            if counted == max_len {
                return &source[..i];
            }
            counted += 1;
        }
    }
    source
}
