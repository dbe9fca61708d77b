// VM Error types: parse errors, execution faults, and the per-tank program error

use std::fmt;
use thiserror::Error;

/// Stack Errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StackError {
    #[error("Stack overflow")]
    Overflow,
    #[error("Stack underflow")]
    Underflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnclosedBlock,
    UnexpectedClose,
}

/// Syntax error raised while parsing program source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at offset {position}")]
pub struct ParseError {
    /// Byte offset of the offending brace
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnclosedBlock => write!(f, "Unmatched '{{'"),
            ParseErrorKind::UnexpectedClose => write!(f, "Unmatched '}}'"),
        }
    }
}

/// The per-tick resources a program can exhaust
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Instructions,
    DataStack,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Instructions => write!(f, "instruction budget"),
            Resource::DataStack => write!(f, "data stack"),
        }
    }
}

/// VM Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VMFault {
    #[error("No such function '{0}'")]
    UnknownOperation(String),
    #[error("Tried to pop from empty stack")]
    StackUnderflow,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid memory location {0}")]
    InvalidMemoryAddress(f64),
    #[error("Type mismatch: expected a {expected}")]
    TypeMismatch { expected: &'static str },
    #[error("Exceeded {0}")]
    ResourceExceeded(Resource),
}

impl From<StackError> for VMFault {
    fn from(err: StackError) -> Self {
        match err {
            StackError::Underflow => VMFault::StackUnderflow,
            StackError::Overflow => VMFault::ResourceExceeded(Resource::DataStack),
        }
    }
}

/// What a tank records when its program fails for a tick
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgramError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),
    #[error("{fault} (instruction {position})")]
    Fault { fault: VMFault, position: usize },
}

impl ProgramError {
    /// Source offset for syntax errors, instruction index for faults
    pub fn position(&self) -> usize {
        match self {
            ProgramError::Syntax(err) => err.position,
            ProgramError::Fault { position, .. } => *position,
        }
    }

    pub fn fault(&self) -> Option<&VMFault> {
        match self {
            ProgramError::Syntax(_) => None,
            ProgramError::Fault { fault, .. } => Some(fault),
        }
    }
}
