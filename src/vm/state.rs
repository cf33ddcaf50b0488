// VM State: memory, relative base, ip, run status, fault status, step counter

use super::Cell;
use super::error::VMFault;
use super::memory::{DenseMemory, Memory};
use super::registers::RelativeBase;

/// Run status of one VM instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    Running,
    /// Suspended on an Input instruction with the input queue empty
    AwaitingInput,
    Halted,
    Faulted,
}

/// Execution state for one running program
#[derive(Debug, Clone)]
pub struct VMState<M: Memory = DenseMemory> {
    pub memory: M,
    pub relative_base: RelativeBase,
    pub ip: usize, // Instruction pointer
    pub status: Status,
    pub fault: Option<VMFault>,
    pub steps: u64, // Instructions completed
}

impl<M: Memory> VMState<M> {
    pub fn new(memory: M) -> Self {
        VMState {
            memory,
            relative_base: RelativeBase::new(),
            ip: 0,
            status: Status::Ready,
            fault: None,
            steps: 0,
        }
    }

    /// Moves the instruction pointer past `width` cells
    pub fn advance_ip(&mut self, width: usize) -> Result<(), VMFault> {
        self.ip = self
            .ip
            .checked_add(width)
            .ok_or(VMFault::InstructionPointerOverflow)?;
        Ok(())
    }

    pub fn set_fault(&mut self, fault: VMFault) {
        self.status = Status::Faulted;
        self.fault = Some(fault);
    }

    /// Reads the `count` cells after the opcode at the instruction pointer, unresolved
    pub fn raw_operands(&self, count: usize) -> Result<Vec<Cell>, VMFault> {
        (1..=count)
            .map(|offset| {
                let address = self
                    .ip
                    .checked_add(offset)
                    .ok_or(VMFault::InstructionPointerOverflow)?;
                Ok(self.memory.read(address))
            })
            .collect()
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.status, Status::Halted | Status::Faulted)
    }
}
