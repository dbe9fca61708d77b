// VM data stack: bounded stack of numbers and blocks

use super::error::StackError;
use super::value::Value;

/// Bounded stack for VM operations
#[derive(Debug, Clone)]
pub struct Stack {
    data: Vec<Value>,
    max_size: usize,
}

impl Stack {
    /// Creates a new stack with the specified maximum size
    pub fn with_size(max_size: usize) -> Self {
        Stack {
            data: Vec::new(),
            max_size,
        }
    }

    /// Pushes a value onto the stack
    pub fn push(&mut self, value: Value) -> Result<(), StackError> {
        if self.data.len() >= self.max_size {
            return Err(StackError::Overflow);
        }
        self.data.push(value);
        Ok(())
    }

    /// Pops a value from the stack
    pub fn pop(&mut self) -> Result<Value, StackError> {
        self.data.pop().ok_or(StackError::Underflow)
    }

    pub fn pop_number(&mut self) -> Result<f64, super::error::VMFault> {
        Ok(self.pop()?.number()?)
    }

    /// Duplicates the top value on the stack
    pub fn dup(&mut self) -> Result<(), StackError> {
        let top = self.data.last().cloned().ok_or(StackError::Underflow)?;
        self.push(top)
    }

    /// Swaps the top two values on the stack
    pub fn swap(&mut self) -> Result<(), StackError> {
        let len = self.data.len();
        if len < 2 {
            return Err(StackError::Underflow);
        }
        self.data.swap(len - 1, len - 2);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The stack contents, bottom first
    pub fn view(&self) -> &[Value] {
        &self.data
    }
}
