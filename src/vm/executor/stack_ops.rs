use super::processor::InstructionProcessor;
use crate::vm::error::VMFault;
use crate::vm::host::TankHost;
use crate::vm::instruction::Operation;
use crate::vm::state::VMState;

/// Processor for stack manipulation. These work on blocks as well as numbers.
pub struct StackOperations;

impl StackOperations {
    pub fn new() -> Self {
        StackOperations
    }
}

impl InstructionProcessor for StackOperations {
    fn can_process(&self, operation: Operation) -> bool {
        matches!(operation, Operation::Dup | Operation::Pop | Operation::Exch)
    }

    fn process(
        &self,
        vm: &mut VMState,
        _host: &mut dyn TankHost,
        operation: Operation,
    ) -> Result<(), VMFault> {
        match operation {
            Operation::Dup => Ok(vm.data.dup()?),
            Operation::Pop => {
                vm.data.pop()?;
                Ok(())
            }
            Operation::Exch => Ok(vm.data.swap()?),
            _ => Err(VMFault::UnknownOperation(operation.name().to_string())),
        }
    }
}
