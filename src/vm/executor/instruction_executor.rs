use crate::config::GameConfig;
use crate::vm::bindings::Bindings;
use crate::vm::error::{ProgramError, Resource, VMFault};
use crate::vm::host::{NullHost, TankHost};
use crate::vm::instruction::Operation;
use crate::vm::parser::{Program, parse_program};
use crate::vm::state::VMState;
use crate::vm::value::Value;

use super::arithmetic_ops::ArithmeticOperations;
use super::bitwise_ops::BitwiseOperations;
use super::combat_ops::CombatOperations;
use super::component_ops::ComponentOperations;
use super::control_flow_ops::ControlFlowOperations;
use super::memory_ops::MemoryOperations;
use super::misc_ops::MiscellaneousOperations;
use super::processor::InstructionProcessor;
use super::stack_ops::StackOperations;

/// Runs programs against a binding table with a per-run instruction budget
pub struct InstructionExecutor {
    processors: Vec<Box<dyn InstructionProcessor>>,
    bindings: Bindings,
    instruction_budget: usize,
}

impl InstructionExecutor {
    /// Create a new executor with all processors registered
    pub fn new(bindings: Bindings, instruction_budget: usize) -> Self {
        let processors: Vec<Box<dyn InstructionProcessor>> = vec![
            Box::new(StackOperations::new()),
            Box::new(ArithmeticOperations::new()),
            Box::new(BitwiseOperations::new()),
            Box::new(ControlFlowOperations::new()),
            Box::new(MemoryOperations::new()),
            Box::new(ComponentOperations::new()),
            Box::new(CombatOperations::new()),
            Box::new(MiscellaneousOperations::new()),
        ];

        InstructionExecutor {
            processors,
            bindings,
            instruction_budget,
        }
    }

    /// The executor tanks run under for a given match configuration
    pub fn for_tanks(config: &GameConfig) -> Self {
        Self::new(
            Bindings::tank(config.teleport_enabled),
            config.instruction_budget,
        )
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Execute a single operation, delegating to the appropriate processor
    pub fn execute_operation(
        &self,
        vm: &mut VMState,
        host: &mut dyn TankHost,
        operation: Operation,
    ) -> Result<(), VMFault> {
        for processor in &self.processors {
            if processor.can_process(operation) {
                return processor.process(vm, host, operation);
            }
        }
        // Every Operation has a processor; only a misregistered one ends up here
        Err(VMFault::UnknownOperation(operation.name().to_string()))
    }

    /// Pop and execute the next command. Numbers and blocks go to the data
    /// stack; words are resolved against the bindings and invoked.
    pub fn step(&self, vm: &mut VMState, host: &mut dyn TankHost) -> Result<(), VMFault> {
        let Some(value) = vm.commands.pop() else {
            return Ok(());
        };
        vm.executed += 1;
        match value {
            Value::Word(name) => match self.bindings.lookup(&name) {
                Some(operation) => self.execute_operation(vm, host, operation),
                None => Err(VMFault::UnknownOperation(name)),
            },
            other => Ok(vm.data.push(other)?),
        }
    }

    /// Load `program` and run it to completion, the first fault, or the budget
    pub fn run(
        &self,
        vm: &mut VMState,
        host: &mut dyn TankHost,
        program: Program,
    ) -> Result<(), ProgramError> {
        vm.load(program);
        while !vm.commands.is_empty() {
            let position = vm.executed;
            if position >= self.instruction_budget {
                return Err(ProgramError::Fault {
                    fault: VMFault::ResourceExceeded(Resource::Instructions),
                    position,
                });
            }
            self.step(vm, host)
                .map_err(|fault| ProgramError::Fault { fault, position })?;
        }
        Ok(())
    }

    /// Parse and run `source` with no tank attached, returning the data stack
    pub fn evaluate(&self, source: &str) -> Result<Vec<Value>, ProgramError> {
        let mut vm = VMState::new();
        let program = parse_program(source)?;
        self.run(&mut vm, &mut NullHost, program)?;
        Ok(vm.data.view().to_vec())
    }
}

impl Default for InstructionExecutor {
    fn default() -> Self {
        Self::new(Bindings::core(), crate::config::MAX_INSTRUCTIONS_PER_TICK)
    }
}
