use crate::vm::Cell;
use crate::vm::error::VMFault;
use crate::vm::instruction::{Instruction, Opcode};
use crate::vm::memory::{Memory, to_address};
use crate::vm::operand::Operand;
use crate::vm::state::VMState;
use num_traits::Zero;
use std::collections::VecDeque;

use super::processor::{Effect, InstructionProcessor, unhandled};

/// Processor for conditional jumps and halt
pub struct ControlFlowOperations;

impl ControlFlowOperations {
    pub fn new() -> Self {
        ControlFlowOperations
    }
}

impl<M: Memory> InstructionProcessor<M> for ControlFlowOperations {
    fn can_process(&self, opcode: Opcode) -> bool {
        matches!(
            opcode,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse | Opcode::Halt
        )
    }

    fn process(
        &self,
        vm: &mut VMState<M>,
        instr: &Instruction,
        operands: &[Operand],
        _input: &mut VecDeque<Cell>,
    ) -> Result<Effect, VMFault> {
        let jump_when_zero = match instr.opcode {
            Opcode::Halt => {
                crate::debug_instructions!("Halt at IP {}", vm.ip);
                return Ok(Effect::Halt);
            }
            Opcode::JumpIfTrue => false,
            Opcode::JumpIfFalse => true,
            _ => return Err(unhandled(vm, instr)),
        };

        let condition = operands[0].get_value(vm)?;
        let target = operands[1].get_value(vm)?;
        let is = condition.is_zero() == jump_when_zero;
        crate::debug_instructions!(
            "{:?}: condition = {}. Jumping to {}? {}",
            instr.opcode,
            condition,
            target,
            is
        );
        if is {
            Ok(Effect::Jump(to_address(&target)?))
        } else {
            Ok(Effect::Continue)
        }
    }
}
