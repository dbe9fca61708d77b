use super::processor::InstructionProcessor;
use crate::debug_vm;
use crate::vm::error::VMFault;
use crate::vm::host::TankHost;
use crate::vm::instruction::Operation;
use crate::vm::state::VMState;
use crate::vm::value::Value;

/// Processor for `random` and `debug!`
pub struct MiscellaneousOperations;

impl MiscellaneousOperations {
    pub fn new() -> Self {
        MiscellaneousOperations
    }
}

impl InstructionProcessor for MiscellaneousOperations {
    fn can_process(&self, operation: Operation) -> bool {
        matches!(operation, Operation::Random | Operation::Debug)
    }

    fn process(
        &self,
        vm: &mut VMState,
        host: &mut dyn TankHost,
        operation: Operation,
    ) -> Result<(), VMFault> {
        match operation {
            Operation::Random => {
                let max = vm.data.pop_number()?;
                let n = if max < 1.0 { 0.0 } else { host.random(max) };
                vm.data.push(Value::Number(n))?;
                Ok(())
            }
            Operation::Debug => {
                let value = vm.data.pop()?;
                debug_vm!("debug! {}", value);
                Ok(())
            }
            _ => Err(VMFault::UnknownOperation(operation.name().to_string())),
        }
    }
}
