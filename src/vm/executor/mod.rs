// VM Instruction execution: routes decoded instructions to processors that update VM state

pub mod arithmetic_ops;
pub mod comparison_ops;
pub mod control_flow_ops;
pub mod instruction_executor;
pub mod io_ops;
pub mod processor;
pub mod register_ops;

pub use crate::vm::instruction::Instruction;
pub use crate::vm::operand::Operand;
pub use instruction_executor::InstructionExecutor;
pub use processor::{Effect, InstructionProcessor};
