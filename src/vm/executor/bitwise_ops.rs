use super::processor::InstructionProcessor;
use crate::vm::error::VMFault;
use crate::vm::host::TankHost;
use crate::vm::instruction::Operation;
use crate::vm::state::VMState;
use crate::vm::value::{Value, to_int32};

/// Processor for bitwise operations on 32-bit signed integers
pub struct BitwiseOperations;

impl BitwiseOperations {
    pub fn new() -> Self {
        BitwiseOperations
    }

    fn binary(vm: &mut VMState, f: impl FnOnce(i32, i32) -> i32) -> Result<(), VMFault> {
        let a = to_int32(vm.data.pop_number()?);
        let b = to_int32(vm.data.pop_number()?);
        vm.data.push(Value::Number(f(b, a) as f64))?;
        Ok(())
    }
}

impl InstructionProcessor for BitwiseOperations {
    fn can_process(&self, operation: Operation) -> bool {
        matches!(
            operation,
            Operation::BitNot
                | Operation::And
                | Operation::Or
                | Operation::Xor
                | Operation::Shl
                | Operation::Shr
        )
    }

    fn process(
        &self,
        vm: &mut VMState,
        _host: &mut dyn TankHost,
        operation: Operation,
    ) -> Result<(), VMFault> {
        match operation {
            Operation::BitNot => {
                let a = to_int32(vm.data.pop_number()?);
                vm.data.push(Value::Number(!a as f64))?;
                Ok(())
            }
            Operation::And => Self::binary(vm, |b, a| b & a),
            Operation::Or => Self::binary(vm, |b, a| b | a),
            Operation::Xor => Self::binary(vm, |b, a| b ^ a),
            // Shift counts use their low five bits; `>>` keeps the sign
            Operation::Shl => Self::binary(vm, |b, a| b.wrapping_shl(a as u32)),
            Operation::Shr => Self::binary(vm, |b, a| b.wrapping_shr(a as u32)),
            _ => Err(VMFault::UnknownOperation(operation.name().to_string())),
        }
    }
}
