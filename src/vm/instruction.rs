use crate::vm::Cell;
use crate::vm::error::VMFault;
use crate::vm::operand::AddressingMode;
use num_traits::ToPrimitive;

/// The ten instruction classes of the Intcode set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    Multiply,
    Input,
    Output,
    JumpIfTrue,
    JumpIfFalse,
    LessThan,
    Equals,
    AdjustRelativeBase,
    Halt,
}

impl Opcode {
    /// Maps an instruction number (the low two decimal digits) to its class
    pub fn from_number(number: i64) -> Option<Self> {
        use Opcode::*;
        match number {
            1 => Some(Add),
            2 => Some(Multiply),
            3 => Some(Input),
            4 => Some(Output),
            5 => Some(JumpIfTrue),
            6 => Some(JumpIfFalse),
            7 => Some(LessThan),
            8 => Some(Equals),
            9 => Some(AdjustRelativeBase),
            99 => Some(Halt),
            _ => None,
        }
    }

    pub fn number(&self) -> i64 {
        use Opcode::*;
        match self {
            Add => 1,
            Multiply => 2,
            Input => 3,
            Output => 4,
            JumpIfTrue => 5,
            JumpIfFalse => 6,
            LessThan => 7,
            Equals => 8,
            AdjustRelativeBase => 9,
            Halt => 99,
        }
    }

    /// Number of operand cells following the opcode cell
    pub fn arity(&self) -> usize {
        use Opcode::*;
        match self {
            Add | Multiply | LessThan | Equals => 3,
            JumpIfTrue | JumpIfFalse => 2,
            Input | Output | AdjustRelativeBase => 1,
            Halt => 0,
        }
    }

    pub fn is_halt(&self) -> bool {
        matches!(self, Opcode::Halt)
    }

    /// Result is a new instruction pointer rather than a stored value
    pub fn is_jump(&self) -> bool {
        matches!(self, Opcode::JumpIfTrue | Opcode::JumpIfFalse)
    }

    pub fn requires_input(&self) -> bool {
        matches!(self, Opcode::Input)
    }
}

/// A decoded opcode cell: the instruction class plus its raw encoding,
/// which still carries the per-operand mode digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub raw: i64,
}

impl Instruction {
    /// Decodes the opcode cell found at `address`.
    pub fn decode(cell: &Cell, address: usize) -> Result<Self, VMFault> {
        let unknown = || VMFault::UnknownOpcode {
            opcode: cell.clone(),
            address,
        };
        let raw = cell.to_i64().filter(|raw| *raw >= 0).ok_or_else(unknown)?;
        let opcode = Opcode::from_number(raw % 100).ok_or_else(unknown)?;
        Ok(Instruction { opcode, raw })
    }

    /// Addressing mode of the 1-indexed operand `position`.
    ///
    /// The digit sits at decimal place `position + 2`; missing digits are 0.
    pub fn mode(&self, position: usize) -> Result<AddressingMode, VMFault> {
        mode_of(self.raw, position)
    }

    pub fn arity(&self) -> usize {
        self.opcode.arity()
    }

    /// Total cells occupied, opcode included
    pub fn width(&self) -> usize {
        1 + self.arity()
    }
}

/// Pulls the mode digit for `position` out of a raw opcode
pub fn mode_digit(raw: i64, position: usize) -> i64 {
    u32::try_from(position)
        .ok()
        .and_then(|position| position.checked_add(1))
        .and_then(|exponent| 10i64.checked_pow(exponent))
        .map_or(0, |divider| (raw / divider) % 10)
}

/// Decodes the mode of operand `position` straight from an opcode value
pub fn mode_of(opcode: i64, position: usize) -> Result<AddressingMode, VMFault> {
    let digit = mode_digit(opcode, position);
    AddressingMode::from_digit(digit).ok_or(VMFault::InvalidMode {
        opcode,
        position,
        digit,
    })
}
