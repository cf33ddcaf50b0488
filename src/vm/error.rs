// VM Error types: memory addressing errors, program load errors, VM faults

use super::Cell;
use thiserror::Error;

/// Address conversion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Negative address {0}")]
    Negative(Cell),
    #[error("Address {0} exceeds the addressable range")]
    Overflow(Cell),
}

/// Program load error, positioned at the offending cell
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cell {index}: {message}")]
pub struct ParseError {
    pub index: usize,
    pub message: String,
}

/// VM Errors
///
/// Every variant is fatal for the instance that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VMFault {
    #[error("Unknown opcode {opcode} at address {address}")]
    UnknownOpcode { opcode: Cell, address: usize },
    #[error("Invalid mode digit {digit} for operand {position} of opcode {opcode}")]
    InvalidMode {
        opcode: i64,
        position: usize,
        digit: i64,
    },
    #[error("Immediate mode used as write target for operand {position} ({operand})")]
    ImmediateWrite { position: usize, operand: Cell },
    #[error("Resolved address {0} is negative")]
    NegativeAddress(Cell),
    #[error("Resolved address {0} exceeds the addressable range")]
    AddressOverflow(Cell),
    #[error("Instruction pointer overflow")]
    InstructionPointerOverflow,
}

impl VMFault {
    /// True for the faults caused by a bad mode or address in the instruction stream
    pub fn is_mode_error(&self) -> bool {
        matches!(
            self,
            VMFault::InvalidMode { .. }
                | VMFault::ImmediateWrite { .. }
                | VMFault::NegativeAddress(_)
        )
    }
}

impl From<AddressError> for VMFault {
    fn from(err: AddressError) -> Self {
        match err {
            AddressError::Negative(cell) => VMFault::NegativeAddress(cell),
            AddressError::Overflow(cell) => VMFault::AddressOverflow(cell),
        }
    }
}
