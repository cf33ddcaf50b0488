use crate::vm::Cell;
use crate::vm::error::VMFault;
use crate::vm::instruction::{Instruction, Opcode};
use crate::vm::memory::Memory;
use crate::vm::operand::Operand;
use crate::vm::state::VMState;
use std::collections::VecDeque;

use super::processor::{Effect, InstructionProcessor, unhandled};

/// Processor for the input and output channels
pub struct IoOperations;

impl IoOperations {
    pub fn new() -> Self {
        IoOperations
    }
}

impl<M: Memory> InstructionProcessor<M> for IoOperations {
    fn can_process(&self, opcode: Opcode) -> bool {
        matches!(opcode, Opcode::Input | Opcode::Output)
    }

    fn process(
        &self,
        vm: &mut VMState<M>,
        instr: &Instruction,
        operands: &[Operand],
        input: &mut VecDeque<Cell>,
    ) -> Result<Effect, VMFault> {
        match instr.opcode {
            Opcode::Input => {
                // Destination goes through write resolution like every other store
                let address = operands[0].write_address(vm)?;
                let Some(value) = input.pop_front() else {
                    crate::debug_instructions!("Input: queue empty, suspending at IP {}", vm.ip);
                    return Ok(Effect::AwaitingInput);
                };
                crate::debug_instructions!("Input: [{}] = {}", address, value);
                vm.memory.write(address, value)?;
                Ok(Effect::Continue)
            }
            Opcode::Output => {
                let value = operands[0].get_value(vm)?;
                crate::debug_instructions!("Output: {}", value);
                Ok(Effect::Output(value))
            }
            _ => Err(unhandled(vm, instr)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::memory::DenseMemory;

    fn setup(cells: &[i64]) -> VMState {
        VMState::new(DenseMemory::from(
            cells.iter().map(|c| Cell::from(*c)).collect::<Vec<_>>(),
        ))
    }

    fn run(vm: &mut VMState, input: &mut VecDeque<Cell>) -> Result<Effect, VMFault> {
        let instr = Instruction::decode(&vm.memory.read(vm.ip), vm.ip)?;
        let raw = vm.raw_operands(instr.arity())?;
        let operands = Operand::decode_all(&instr, &raw)?;
        IoOperations::new().process(vm, &instr, &operands, input)
    }

    #[test]
    fn test_can_process() {
        let processor = IoOperations::new();
        assert!(InstructionProcessor::<DenseMemory>::can_process(&processor, Opcode::Input));
        assert!(InstructionProcessor::<DenseMemory>::can_process(&processor, Opcode::Output));
        assert!(!InstructionProcessor::<DenseMemory>::can_process(&processor, Opcode::Add));
    }

    #[test]
    fn test_input_consumes_fifo() {
        let mut vm = setup(&[3, 0, 99]);
        let mut input = VecDeque::from(vec![Cell::from(42), Cell::from(7)]);
        assert_eq!(run(&mut vm, &mut input), Ok(Effect::Continue));
        assert_eq!(vm.memory.read(0), Cell::from(42));
        assert_eq!(input, VecDeque::from(vec![Cell::from(7)]));
    }

    #[test]
    fn test_input_underrun_suspends() {
        let mut vm = setup(&[3, 5, 99]);
        let mut input = VecDeque::new();
        assert_eq!(run(&mut vm, &mut input), Ok(Effect::AwaitingInput));
        assert_eq!(vm.memory.read(5), Cell::from(0));
        assert_eq!(vm.memory.len(), 3);
    }

    #[test]
    fn test_input_relative_destination() {
        let mut vm = setup(&[203, -2, 99]);
        vm.relative_base.adjust(&Cell::from(50));
        let mut input = VecDeque::from(vec![Cell::from(-8)]);
        run(&mut vm, &mut input).unwrap();
        assert_eq!(vm.memory.read(48), Cell::from(-8));
        // The raw operand itself is never used as the address
        assert_eq!(vm.memory.read(1), Cell::from(-2));
    }

    #[test]
    fn test_input_immediate_destination_faults() {
        let mut vm = setup(&[103, 1, 99]);
        let mut input = VecDeque::from(vec![Cell::from(1)]);
        let result = run(&mut vm, &mut input);
        assert!(matches!(result, Err(VMFault::ImmediateWrite { position: 1, .. })));
        // The value stays queued
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn test_output_modes() {
        let mut input = VecDeque::new();
        assert_eq!(
            run(&mut setup(&[4, 2, 77]), &mut input),
            Ok(Effect::Output(Cell::from(77)))
        );
        assert_eq!(
            run(&mut setup(&[104, 2, 77]), &mut input),
            Ok(Effect::Output(Cell::from(2)))
        );
        let mut vm = setup(&[204, -1, 77]);
        vm.relative_base.adjust(&Cell::from(3));
        assert_eq!(run(&mut vm, &mut input), Ok(Effect::Output(Cell::from(77))));
    }
}
