use crate::vm::Cell;
use crate::vm::error::VMFault;
use crate::vm::instruction::{Instruction, Opcode};
use crate::vm::memory::Memory;
use crate::vm::operand::Operand;
use crate::vm::state::VMState;
use std::collections::VecDeque;

/// What the driving loop must do after an instruction has been processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Advance past the instruction
    Continue,
    /// Set the instruction pointer to the target
    Jump(usize),
    /// Deliver the value to the output channel, then advance
    Output(Cell),
    /// No input was available; nothing changed and the instruction must be retried
    AwaitingInput,
    /// Stop the instance
    Halt,
}

/// A processor handles one family of instructions
pub trait InstructionProcessor<M: Memory>: Send + Sync {
    fn can_process(&self, opcode: Opcode) -> bool;

    /// Applies `instr` to the VM state. `operands` are the raw cells after the
    /// opcode, paired with their modes but not yet resolved.
    fn process(
        &self,
        vm: &mut VMState<M>,
        instr: &Instruction,
        operands: &[Operand],
        input: &mut VecDeque<Cell>,
    ) -> Result<Effect, VMFault>;
}

/// Fault for an instruction routed to a processor that does not handle it
pub(crate) fn unhandled<M: Memory>(vm: &VMState<M>, instr: &Instruction) -> VMFault {
    VMFault::UnknownOpcode {
        opcode: Cell::from(instr.raw),
        address: vm.ip,
    }
}
