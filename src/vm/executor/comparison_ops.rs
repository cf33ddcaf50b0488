use crate::vm::Cell;
use crate::vm::error::VMFault;
use crate::vm::instruction::{Instruction, Opcode};
use crate::vm::memory::Memory;
use crate::vm::operand::Operand;
use crate::vm::state::VMState;
use num_traits::{One, Zero};
use std::collections::VecDeque;

use super::processor::{Effect, InstructionProcessor, unhandled};

/// Processor for comparisons that store 1 or 0
pub struct ComparisonOperations;

impl ComparisonOperations {
    pub fn new() -> Self {
        ComparisonOperations
    }
}

impl<M: Memory> InstructionProcessor<M> for ComparisonOperations {
    fn can_process(&self, opcode: Opcode) -> bool {
        matches!(opcode, Opcode::LessThan | Opcode::Equals)
    }

    fn process(
        &self,
        vm: &mut VMState<M>,
        instr: &Instruction,
        operands: &[Operand],
        _input: &mut VecDeque<Cell>,
    ) -> Result<Effect, VMFault> {
        let a = operands[0].get_value(vm)?;
        let b = operands[1].get_value(vm)?;
        let holds = match instr.opcode {
            Opcode::LessThan => a < b,
            Opcode::Equals => a == b,
            _ => return Err(unhandled(vm, instr)),
        };
        let address = operands[2].write_address(vm)?;
        crate::debug_instructions!("{:?}: {} vs {} -> [{}] = {}", instr.opcode, a, b, address, holds);
        vm.memory
            .write(address, if holds { Cell::one() } else { Cell::zero() })?;
        Ok(Effect::Continue)
    }
}
