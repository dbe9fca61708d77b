// VM module entry point: a stack language re-parsed and run once per tick

pub mod bindings;
pub mod error;
pub mod executor;
pub mod host;
pub mod instruction;
pub mod parser;
pub mod stack;
pub mod state;
pub mod value;

pub use bindings::Bindings;
pub use error::{ParseError, ProgramError, VMFault};
pub use executor::InstructionExecutor;
pub use host::TankHost;
pub use parser::{Program, parse_program};
pub use state::VMState;
pub use value::Value;
