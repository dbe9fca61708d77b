use super::processor::InstructionProcessor;
use crate::vm::error::VMFault;
use crate::vm::host::TankHost;
use crate::vm::instruction::Operation;
use crate::vm::state::VMState;
use crate::vm::value::{Value, to_int32};

/// Processor for arithmetic, comparison and logical-not operations.
///
/// Everything except `/` truncates its result to a 32-bit integer.
pub struct ArithmeticOperations;

impl ArithmeticOperations {
    pub fn new() -> Self {
        ArithmeticOperations
    }

    /// Pop `a` then `b` and push `f(b, a)`, so `3 4 -` computes `3 - 4`
    fn binary(
        vm: &mut VMState,
        f: impl FnOnce(f64, f64) -> Result<f64, VMFault>,
    ) -> Result<(), VMFault> {
        let a = vm.data.pop_number()?;
        let b = vm.data.pop_number()?;
        vm.data.push(Value::Number(f(b, a)?))?;
        Ok(())
    }

    fn compare(vm: &mut VMState, f: impl FnOnce(f64, f64) -> bool) -> Result<(), VMFault> {
        let a = vm.data.pop_number()?;
        let b = vm.data.pop_number()?;
        vm.data.push(Value::from(f(b, a)))?;
        Ok(())
    }
}

fn truncated(n: f64) -> Result<f64, VMFault> {
    Ok(to_int32(n) as f64)
}

impl InstructionProcessor for ArithmeticOperations {
    fn can_process(&self, operation: Operation) -> bool {
        matches!(
            operation,
            Operation::Add
                | Operation::Sub
                | Operation::Mul
                | Operation::Div
                | Operation::Mod
                | Operation::Abs
                | Operation::Gt
                | Operation::Ge
                | Operation::Lt
                | Operation::Le
                | Operation::Eq
                | Operation::Ne
                | Operation::Not
        )
    }

    fn process(
        &self,
        vm: &mut VMState,
        _host: &mut dyn TankHost,
        operation: Operation,
    ) -> Result<(), VMFault> {
        match operation {
            Operation::Add => Self::binary(vm, |b, a| truncated(b + a)),
            Operation::Sub => Self::binary(vm, |b, a| truncated(b - a)),
            Operation::Mul => Self::binary(vm, |b, a| truncated(b * a)),
            Operation::Div => Self::binary(vm, |b, a| {
                if a == 0.0 {
                    return Err(VMFault::DivisionByZero);
                }
                Ok(b / a)
            }),
            // Remainder takes the sign of the dividend
            Operation::Mod => Self::binary(vm, |b, a| {
                if a == 0.0 {
                    return Err(VMFault::DivisionByZero);
                }
                truncated(b % a)
            }),
            Operation::Abs => {
                let a = vm.data.pop_number()?;
                vm.data.push(Value::Number(truncated(a.abs())?))?;
                Ok(())
            }
            Operation::Gt => Self::compare(vm, |b, a| b > a),
            Operation::Ge => Self::compare(vm, |b, a| b >= a),
            Operation::Lt => Self::compare(vm, |b, a| b < a),
            Operation::Le => Self::compare(vm, |b, a| b <= a),
            Operation::Eq => Self::compare(vm, |b, a| b == a),
            Operation::Ne => Self::compare(vm, |b, a| b != a),
            Operation::Not => {
                let a = vm.data.pop()?;
                let truthy = a.is_truthy()?;
                vm.data.push(Value::from(!truthy))?;
                Ok(())
            }
            _ => Err(VMFault::UnknownOperation(operation.name().to_string())),
        }
    }
}
