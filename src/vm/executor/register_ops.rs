use crate::vm::Cell;
use crate::vm::error::VMFault;
use crate::vm::instruction::{Instruction, Opcode};
use crate::vm::memory::Memory;
use crate::vm::operand::Operand;
use crate::vm::state::VMState;
use std::collections::VecDeque;

use super::processor::{Effect, InstructionProcessor, unhandled};

/// Processor for relative base adjustment
pub struct RegisterOperations;

impl RegisterOperations {
    pub fn new() -> Self {
        RegisterOperations
    }
}

impl<M: Memory> InstructionProcessor<M> for RegisterOperations {
    fn can_process(&self, opcode: Opcode) -> bool {
        matches!(opcode, Opcode::AdjustRelativeBase)
    }

    fn process(
        &self,
        vm: &mut VMState<M>,
        instr: &Instruction,
        operands: &[Operand],
        _input: &mut VecDeque<Cell>,
    ) -> Result<Effect, VMFault> {
        if instr.opcode != Opcode::AdjustRelativeBase {
            return Err(unhandled(vm, instr));
        }
        // Resolved against the base as it was before this adjustment
        let delta = operands[0].get_value(vm)?;
        vm.relative_base.adjust(&delta);
        crate::debug_instructions!(
            "AdjustRelativeBase: {} -> {}",
            delta,
            vm.relative_base.get()
        );
        Ok(Effect::Continue)
    }
}
