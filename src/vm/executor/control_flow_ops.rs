use super::processor::InstructionProcessor;
use crate::vm::error::VMFault;
use crate::vm::host::TankHost;
use crate::vm::instruction::Operation;
use crate::vm::state::VMState;

/// Processor for `if` and `ifelse`.
///
/// A taken block is not executed here; its contents are spliced onto the
/// command stack so the executor runs them next, one value at a time.
pub struct ControlFlowOperations;

impl ControlFlowOperations {
    pub fn new() -> Self {
        ControlFlowOperations
    }
}

impl InstructionProcessor for ControlFlowOperations {
    fn can_process(&self, operation: Operation) -> bool {
        matches!(operation, Operation::If | Operation::IfElse)
    }

    fn process(
        &self,
        vm: &mut VMState,
        _host: &mut dyn TankHost,
        operation: Operation,
    ) -> Result<(), VMFault> {
        match operation {
            Operation::If => {
                let body = vm.data.pop()?.into_block()?;
                let condition = vm.data.pop()?.is_truthy()?;
                if condition {
                    vm.push_block(body);
                }
                Ok(())
            }
            Operation::IfElse => {
                let else_body = vm.data.pop()?.into_block()?;
                let then_body = vm.data.pop()?.into_block()?;
                let condition = vm.data.pop()?.is_truthy()?;
                vm.push_block(if condition { then_body } else { else_body });
                Ok(())
            }
            _ => Err(VMFault::UnknownOperation(operation.name().to_string())),
        }
    }
}
