use crate::vm::Cell;
use crate::vm::error::VMFault;
use crate::vm::instruction::{Instruction, Opcode};
use crate::vm::memory::Memory;
use crate::vm::operand::Operand;
use crate::vm::state::VMState;
use std::collections::VecDeque;

use super::processor::{Effect, InstructionProcessor, unhandled};

/// Processor for arithmetic operations
pub struct ArithmeticOperations;

impl ArithmeticOperations {
    pub fn new() -> Self {
        ArithmeticOperations
    }
}

impl<M: Memory> InstructionProcessor<M> for ArithmeticOperations {
    fn can_process(&self, opcode: Opcode) -> bool {
        matches!(opcode, Opcode::Add | Opcode::Multiply)
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
        let result = match instr.opcode {
            Opcode::Add => a + b,
            Opcode::Multiply => a * b,
            _ => return Err(unhandled(vm, instr)),
        };
        let address = operands[2].write_address(vm)?;
        crate::debug_instructions!("{:?}: [{}] = {}", instr.opcode, address, result);
        vm.memory.write(address, result)?;
        Ok(Effect::Continue)
    }
}
