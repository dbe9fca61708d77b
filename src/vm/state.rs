// VM State: data stack, command stack, memory bank, instruction counter

use super::error::VMFault;
use super::parser::Program;
use super::stack::Stack;
use super::value::Value;
use crate::config;

/// VM state for a tank's program.
///
/// The stacks are rebuilt every tick; the memory bank persists for the match.
#[derive(Debug, Clone)]
pub struct VMState {
    pub data: Stack,
    /// Pending values, next to execute on top (last)
    pub commands: Vec<Value>,
    pub memory: [f64; config::MEMORY_SIZE],
    /// Values popped off the command stack this run
    pub executed: usize,
}

impl Default for VMState {
    fn default() -> Self {
        Self::with_stack_size(config::MAX_DATA_STACK_SIZE)
    }
}

impl VMState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stack_size(stack_size: usize) -> Self {
        VMState {
            data: Stack::with_size(stack_size),
            commands: Vec::new(),
            memory: [0.0; config::MEMORY_SIZE],
            executed: 0,
        }
    }

    /// Reset the transient stacks and queue `program` so its first value runs first
    pub fn load(&mut self, program: Program) {
        self.data.clear();
        self.commands = program.values;
        self.commands.reverse();
        self.executed = 0;
    }

    /// Splice a block's contents in so they run next, in source order
    pub fn push_block(&mut self, body: Vec<Value>) {
        self.commands.extend(body.into_iter().rev());
    }

    fn address(&self, address: f64) -> Result<usize, VMFault> {
        if address.fract() == 0.0 && address >= 0.0 && address < self.memory.len() as f64 {
            Ok(address as usize)
        } else {
            Err(VMFault::InvalidMemoryAddress(address))
        }
    }

    pub fn memory_get(&self, address: f64) -> Result<f64, VMFault> {
        Ok(self.memory[self.address(address)?])
    }

    pub fn memory_set(&mut self, address: f64, value: f64) -> Result<(), VMFault> {
        let slot = self.address(address)?;
        self.memory[slot] = value;
        Ok(())
    }
}
