// VM Instruction execution: resolves words and dispatches them to operation processors

pub mod arithmetic_ops;
pub mod bitwise_ops;
pub mod combat_ops;
pub mod component_ops;
pub mod control_flow_ops;
pub mod instruction_executor;
pub mod memory_ops;
pub mod misc_ops;
pub mod processor;
pub mod stack_ops;

pub use crate::vm::instruction::Operation;
pub use combat_ops::CombatOperations;
pub use component_ops::ComponentOperations;
pub use instruction_executor::InstructionExecutor;
pub use processor::InstructionProcessor;
