use crate::vm::error::VMFault;
use crate::vm::host::TankHost;
use crate::vm::instruction::Operation;
use crate::vm::state::VMState;

/// One family of operations. The executor asks each registered processor in
/// turn whether it handles an operation.
pub trait InstructionProcessor {
    fn can_process(&self, operation: Operation) -> bool;

    fn process(
        &self,
        vm: &mut VMState,
        host: &mut dyn TankHost,
        operation: Operation,
    ) -> Result<(), VMFault>;
}
