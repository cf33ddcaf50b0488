use crate::vm::Cell;
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::memory::Memory;
use crate::vm::operand::Operand;
use crate::vm::state::VMState;
use std::collections::VecDeque;

use super::arithmetic_ops::ArithmeticOperations;
use super::comparison_ops::ComparisonOperations;
use super::control_flow_ops::ControlFlowOperations;
use super::io_ops::IoOperations;
use super::processor::{Effect, InstructionProcessor, unhandled};
use super::register_ops::RegisterOperations;

/// A struct that holds all instruction processors
pub struct InstructionExecutor<M: Memory> {
    processors: Vec<Box<dyn InstructionProcessor<M>>>,
}

impl<M: Memory> InstructionExecutor<M> {
    /// Create a new executor with all processors registered
    pub fn new() -> Self {
        let processors: Vec<Box<dyn InstructionProcessor<M>>> = vec![
            Box::new(ArithmeticOperations::new()),
            Box::new(ComparisonOperations::new()),
            Box::new(ControlFlowOperations::new()),
            Box::new(IoOperations::new()),
            Box::new(RegisterOperations::new()),
        ];

        InstructionExecutor { processors }
    }

    /// Execute a single decoded instruction, delegating to the appropriate processor.
    ///
    /// `raw` must hold exactly `instr.arity()` cells, as read from memory after
    /// the opcode. The instruction pointer is left for the caller to move.
    pub fn execute_instruction(
        &self,
        vm: &mut VMState<M>,
        instr: &Instruction,
        raw: &[Cell],
        input: &mut VecDeque<Cell>,
    ) -> Result<Effect, VMFault> {
        let operands = Operand::decode_all(instr, raw)?;

        for processor in &self.processors {
            if processor.can_process(instr.opcode) {
                return processor.process(vm, instr, &operands, input);
            }
        }

        // No processor found to handle this instruction
        Err(unhandled(vm, instr))
    }
}

impl<M: Memory> Default for InstructionExecutor<M> {
    fn default() -> Self {
        Self::new()
    }
}
