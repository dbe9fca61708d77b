// VM values: numbers, blocks and (unresolved) words

use super::error::VMFault;
use std::fmt;

/// A single element of a program or of the data stack.
///
/// Words only ever live on the command stack; executing one resolves it
/// against the bindings table, so the data stack holds numbers and blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    /// Block contents in source order
    Block(Vec<Value>),
    Word(String),
}

impl Value {
    pub fn number(&self) -> Result<f64, VMFault> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(VMFault::TypeMismatch { expected: "number" }),
        }
    }

    pub fn into_block(self) -> Result<Vec<Value>, VMFault> {
        match self {
            Value::Block(body) => Ok(body),
            _ => Err(VMFault::TypeMismatch { expected: "block" }),
        }
    }

    /// Nonzero is true
    pub fn is_truthy(&self) -> Result<bool, VMFault> {
        Ok(self.number()? != 0.0)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Number(if flag { 1.0 } else { 0.0 })
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

/// Canonical source form. Parsing this output yields the same value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{}", n),
            Value::Word(name) => write!(f, "{}", name),
            Value::Block(body) => {
                write!(f, "{{")?;
                for value in body {
                    write!(f, " {}", value)?;
                }
                write!(f, " }}")
            }
        }
    }
}

/// Integer truncation used by every arithmetic word except `/`:
/// truncate toward zero, then wrap into the signed 32-bit range.
pub fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    let wrapped = n.trunc().rem_euclid(4_294_967_296.0);
    if wrapped >= 2_147_483_648.0 {
        (wrapped - 4_294_967_296.0) as i32
    } else {
        wrapped as i32
    }
}
