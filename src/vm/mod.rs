// VM module entry point

pub mod error;
pub mod executor;
pub mod instruction;
pub mod machine;
pub mod memory;
pub mod operand;
pub mod parser;
pub mod registers;
pub mod state;

/// One arbitrary-precision memory cell
pub type Cell = num_bigint::BigInt;

pub use error::{ParseError, VMFault};
pub use instruction::{Instruction, Opcode, mode_of};
pub use machine::{Machine, StepOutcome};
pub use memory::{DenseMemory, Memory, SparseMemory};
pub use operand::{AddressingMode, resolve_read, resolve_write_address};
pub use parser::parse_program;
pub use registers::RelativeBase;
pub use state::{Status, VMState};
