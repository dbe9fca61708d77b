use super::processor::InstructionProcessor;
use crate::vm::error::VMFault;
use crate::vm::host::TankHost;
use crate::vm::instruction::Operation;
use crate::vm::state::VMState;
use crate::vm::value::Value;

/// Processor for the persistent memory bank: `value pos mset`, `pos mget`
pub struct MemoryOperations;

impl MemoryOperations {
    pub fn new() -> Self {
        MemoryOperations
    }
}

impl InstructionProcessor for MemoryOperations {
    fn can_process(&self, operation: Operation) -> bool {
        matches!(operation, Operation::MSet | Operation::MGet)
    }

    fn process(
        &self,
        vm: &mut VMState,
        _host: &mut dyn TankHost,
        operation: Operation,
    ) -> Result<(), VMFault> {
        match operation {
            Operation::MSet => {
                let address = vm.data.pop_number()?;
                let value = vm.data.pop_number()?;
                vm.memory_set(address, value)
            }
            Operation::MGet => {
                let address = vm.data.pop_number()?;
                let value = vm.memory_get(address)?;
                vm.data.push(Value::Number(value))?;
                Ok(())
            }
            _ => Err(VMFault::UnknownOperation(operation.name().to_string())),
        }
    }
}
