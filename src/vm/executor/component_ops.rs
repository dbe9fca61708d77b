use super::processor::InstructionProcessor;
use crate::utils::{deg_to_rad, rad_to_whole_deg};
use crate::vm::error::VMFault;
use crate::vm::host::TankHost;
use crate::vm::instruction::Operation;
use crate::vm::state::VMState;
use crate::vm::value::Value;

/// Processor for the tank's treads, turret, sensors and LED.
///
/// Programs speak degrees; the host works in radians.
pub struct ComponentOperations;

impl ComponentOperations {
    pub fn new() -> Self {
        ComponentOperations
    }
}

// Tread and turret settings must be real numbers
fn pop_finite(vm: &mut VMState) -> Result<f64, VMFault> {
    let n = vm.data.pop_number()?;
    if n.is_finite() {
        Ok(n)
    } else {
        Err(VMFault::TypeMismatch {
            expected: "finite number",
        })
    }
}

impl InstructionProcessor for ComponentOperations {
    fn can_process(&self, operation: Operation) -> bool {
        matches!(
            operation,
            Operation::SetSpeed
                | Operation::SetTurret
                | Operation::GetTurret
                | Operation::Sensor
                | Operation::SetLed
        )
    }

    fn process(
        &self,
        vm: &mut VMState,
        host: &mut dyn TankHost,
        operation: Operation,
    ) -> Result<(), VMFault> {
        match operation {
            // `left right set-speed!`
            Operation::SetSpeed => {
                let right = pop_finite(vm)?;
                let left = pop_finite(vm)?;
                host.set_speed(left, right);
                Ok(())
            }
            Operation::SetTurret => {
                let degrees = pop_finite(vm)?;
                host.set_turret(deg_to_rad(degrees));
                Ok(())
            }
            Operation::GetTurret => {
                let degrees = rad_to_whole_deg(host.turret());
                vm.data.push(Value::Number(degrees))?;
                Ok(())
            }
            Operation::Sensor => {
                let index = vm.data.pop_number()?;
                vm.data.push(Value::Number(host.sensor(index) as f64))?;
                Ok(())
            }
            Operation::SetLed => {
                let on = vm.data.pop()?.is_truthy()?;
                host.set_led(on);
                Ok(())
            }
            _ => Err(VMFault::UnknownOperation(operation.name().to_string())),
        }
    }
}
