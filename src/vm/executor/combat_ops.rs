use super::processor::InstructionProcessor;
use crate::vm::error::VMFault;
use crate::vm::host::TankHost;
use crate::vm::instruction::Operation;
use crate::vm::state::VMState;
use crate::vm::value::Value;

/// Processor for cannon and teleport operations.
///
/// These only record intent on the host; the combat phase acts on it.
pub struct CombatOperations;

impl CombatOperations {
    pub fn new() -> Self {
        CombatOperations
    }
}

impl InstructionProcessor for CombatOperations {
    fn can_process(&self, operation: Operation) -> bool {
        matches!(
            operation,
            Operation::FireReady | Operation::Fire | Operation::TeleportReady | Operation::Teleport
        )
    }

    fn process(
        &self,
        vm: &mut VMState,
        host: &mut dyn TankHost,
        operation: Operation,
    ) -> Result<(), VMFault> {
        match operation {
            Operation::FireReady => {
                vm.data.push(Value::from(host.fire_ready()))?;
                Ok(())
            }
            Operation::Fire => {
                host.fire();
                Ok(())
            }
            Operation::TeleportReady => {
                vm.data.push(Value::from(host.teleport_ready()))?;
                Ok(())
            }
            Operation::Teleport => {
                host.teleport();
                Ok(())
            }
            _ => Err(VMFault::UnknownOperation(operation.name().to_string())),
        }
    }
}
