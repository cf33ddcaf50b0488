use crate::vm::Cell;
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::memory::{Memory, to_address};
use crate::vm::registers::RelativeBase;
use crate::vm::state::VMState;

/// How a raw operand is turned into a value or an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// The operand is an address to read or write through
    Indirect,
    /// The operand is the value itself; never a write target
    Immediate,
    /// The operand plus the relative base is an address
    Relative,
}

impl AddressingMode {
    pub fn from_digit(digit: i64) -> Option<Self> {
        match digit {
            0 => Some(AddressingMode::Indirect),
            1 => Some(AddressingMode::Immediate),
            2 => Some(AddressingMode::Relative),
            _ => None,
        }
    }
}

/// Resolves the raw operand at `position` to the value it denotes under `mode`
pub fn resolve_read<M: Memory>(
    raw: &Cell,
    position: usize,
    mode: AddressingMode,
    memory: &M,
    base: &RelativeBase,
) -> Result<Cell, VMFault> {
    let value = match mode {
        AddressingMode::Indirect => memory.read(to_address(raw)?),
        AddressingMode::Immediate => raw.clone(),
        AddressingMode::Relative => memory.read(to_address(&base.offset(raw))?),
    };
    log::trace!(target: crate::config::LOG_TARGET_INSTRUCTIONS, "Read operand {} ({:?} {}) = {}", position, mode, raw, value);
    Ok(value)
}

/// Resolves the raw operand at `position` to the address a result is stored at.
///
/// Relocation matches `resolve_read`, so a relative write and a relative read
/// of the same raw operand touch the same cell.
pub fn resolve_write_address(
    raw: &Cell,
    position: usize,
    mode: AddressingMode,
    base: &RelativeBase,
) -> Result<usize, VMFault> {
    match mode {
        AddressingMode::Indirect => Ok(to_address(raw)?),
        AddressingMode::Relative => Ok(to_address(&base.offset(raw))?),
        AddressingMode::Immediate => Err(VMFault::ImmediateWrite {
            position,
            operand: raw.clone(),
        }),
    }
}

/// A raw operand cell paired with the mode its instruction assigns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub raw: Cell,
    pub position: usize,
    pub mode: AddressingMode,
}

impl Operand {
    /// Builds the operands of `instr` from the raw cells that follow it
    pub fn decode_all(instr: &Instruction, raw: &[Cell]) -> Result<Vec<Operand>, VMFault> {
        raw.iter()
            .enumerate()
            .map(|(i, cell)| {
                let position = i + 1;
                Ok(Operand {
                    raw: cell.clone(),
                    position,
                    mode: instr.mode(position)?,
                })
            })
            .collect()
    }

    /// Gets the operand's value, reading memory unless it is immediate
    pub(crate) fn get_value<M: Memory>(&self, vm: &VMState<M>) -> Result<Cell, VMFault> {
        resolve_read(
            &self.raw,
            self.position,
            self.mode,
            &vm.memory,
            &vm.relative_base,
        )
    }

    /// Gets the address a result for this operand is written to
    pub(crate) fn write_address<M: Memory>(&self, vm: &VMState<M>) -> Result<usize, VMFault> {
        resolve_write_address(&self.raw, self.position, self.mode, &vm.relative_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::memory::DenseMemory;

    fn memory_with(cells: &[i64]) -> DenseMemory {
        DenseMemory::from(cells.iter().map(|c| Cell::from(*c)).collect::<Vec<_>>())
    }

    #[test]
    fn test_resolve_read_modes() {
        let memory = memory_with(&[10, 20, 30, 40]);
        let mut base = RelativeBase::new();
        base.adjust(&Cell::from(2));

        let raw = Cell::from(1);
        assert_eq!(
            resolve_read(&raw, 1, AddressingMode::Indirect, &memory, &base),
            Ok(Cell::from(20))
        );
        assert_eq!(
            resolve_read(&raw, 1, AddressingMode::Immediate, &memory, &base),
            Ok(Cell::from(1))
        );
        assert_eq!(
            resolve_read(&raw, 1, AddressingMode::Relative, &memory, &base),
            Ok(Cell::from(40))
        );
        // Past the end of the image reads zero
        assert_eq!(
            resolve_read(&Cell::from(500), 2, AddressingMode::Indirect, &memory, &base),
            Ok(Cell::from(0))
        );
    }

    #[test]
    fn test_relative_write_then_read_same_cell() {
        let mut memory = DenseMemory::new();
        let mut base = RelativeBase::new();
        base.adjust(&Cell::from(100));

        let raw = Cell::from(5);
        let address = resolve_write_address(&raw, 3, AddressingMode::Relative, &base).unwrap();
        assert_eq!(address, 105);
        memory.write(address, Cell::from(1234)).unwrap();
        assert_eq!(
            resolve_read(&raw, 1, AddressingMode::Relative, &memory, &base),
            Ok(Cell::from(1234))
        );
    }

    #[test]
    fn test_relative_negative_raw_operand() {
        let mut base = RelativeBase::new();
        base.adjust(&Cell::from(10));
        assert_eq!(
            resolve_write_address(&Cell::from(-4), 1, AddressingMode::Relative, &base),
            Ok(6)
        );
        assert_eq!(
            resolve_write_address(&Cell::from(-10), 1, AddressingMode::Relative, &base),
            Ok(0)
        );

        let fault = resolve_write_address(&Cell::from(-11), 1, AddressingMode::Relative, &base)
            .unwrap_err();
        assert_eq!(fault, VMFault::NegativeAddress(Cell::from(-1)));
        assert!(fault.is_mode_error());

        let memory = DenseMemory::new();
        assert!(
            resolve_read(&Cell::from(-11), 1, AddressingMode::Relative, &memory, &base)
                .unwrap_err()
                .is_mode_error()
        );
    }

    #[test]
    fn test_immediate_write_rejected() {
        let base = RelativeBase::new();
        let result = resolve_write_address(&Cell::from(3), 3, AddressingMode::Immediate, &base);
        assert_eq!(
            result,
            Err(VMFault::ImmediateWrite {
                position: 3,
                operand: Cell::from(3)
            })
        );
    }

    #[test]
    fn test_decode_all_operands() {
        let instr = Instruction::decode(&Cell::from(21001), 0).unwrap();
        let raw = [Cell::from(4), Cell::from(5), Cell::from(6)];
        let operands = Operand::decode_all(&instr, &raw).unwrap();
        let modes: Vec<_> = operands.iter().map(|op| op.mode).collect();
        assert_eq!(
            modes,
            vec![
                AddressingMode::Indirect,
                AddressingMode::Immediate,
                AddressingMode::Relative
            ]
        );
        assert_eq!(operands[2].raw, Cell::from(6));
        assert_eq!(operands[2].position, 3);
    }
}
