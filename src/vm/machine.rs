// VM Machine: fetch-decode-execute loop over one program with its own I/O queues

use super::Cell;
use super::error::{ParseError, VMFault};
use super::executor::{Effect, InstructionExecutor};
use super::instruction::Instruction;
use super::memory::{DenseMemory, Memory};
use super::parser::parse_program;
use super::registers::RelativeBase;
use super::state::{Status, VMState};
use crate::config;
use std::collections::VecDeque;

/// Result of a single execution step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instruction completed with no output
    Executed,
    /// An Output instruction completed; the value is also queued on the machine
    Output(Cell),
    /// Input instruction with an empty queue; the instruction pointer did not move
    AwaitingInput,
    /// The program has halted
    Halted,
}

/// One Intcode VM instance.
///
/// Memory, relative base, and both I/O queues belong to the instance, so
/// separate machines never observe each other's state.
pub struct Machine<M: Memory = DenseMemory> {
    id: u32,
    program: Vec<Cell>,
    state: VMState<M>,
    executor: InstructionExecutor<M>,
    input: VecDeque<Cell>,
    output: VecDeque<Cell>,
}

impl Machine<DenseMemory> {
    pub fn new(program: Vec<Cell>) -> Self {
        Self::with_id(config::DEFAULT_MACHINE_ID, program)
    }

    /// Parses comma-separated source text and loads it into a new machine
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        Ok(Self::new(parse_program(source)?))
    }
}

impl<M: Memory + From<Vec<Cell>>> Machine<M> {
    /// Creates a machine whose log lines carry `id`
    pub fn with_id(id: u32, program: Vec<Cell>) -> Self {
        let state = VMState::new(M::from(program.clone()));
        crate::debug_vm!(id => "Loaded program of {} cells", program.len());
        Machine {
            id,
            program,
            state,
            executor: InstructionExecutor::new(),
            input: VecDeque::new(),
            output: VecDeque::new(),
        }
    }

    /// Restores the loaded program image and clears registers and queues
    pub fn reset(&mut self) {
        self.state = VMState::new(M::from(self.program.clone()));
        self.input.clear();
        self.output.clear();
        crate::debug_vm!(self.id => "Reset");
    }
}

impl<M: Memory> Machine<M> {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn is_halted(&self) -> bool {
        self.state.status == Status::Halted
    }

    pub fn fault(&self) -> Option<&VMFault> {
        self.state.fault.as_ref()
    }

    pub fn ip(&self) -> usize {
        self.state.ip
    }

    pub fn steps(&self) -> u64 {
        self.state.steps
    }

    pub fn relative_base(&self) -> &RelativeBase {
        &self.state.relative_base
    }

    pub fn memory(&self) -> &M {
        &self.state.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.state.memory
    }

    pub fn push_input(&mut self, value: impl Into<Cell>) {
        self.input.push_back(value.into());
    }

    pub fn extend_input<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        self.input.extend(values.into_iter().map(Into::into));
    }

    pub fn pop_output(&mut self) -> Option<Cell> {
        self.output.pop_front()
    }

    /// Drains every queued output value in emission order
    pub fn take_output(&mut self) -> Vec<Cell> {
        self.output.drain(..).collect()
    }

    /// Executes one instruction.
    ///
    /// A halted machine keeps answering `Halted`; a faulted one keeps
    /// returning its fault.
    pub fn step(&mut self) -> Result<StepOutcome, VMFault> {
        match self.state.status {
            Status::Halted => return Ok(StepOutcome::Halted),
            Status::Faulted => {
                if let Some(fault) = &self.state.fault {
                    return Err(fault.clone());
                }
            }
            _ => {}
        }

        match self.execute_step() {
            Ok(outcome) => Ok(outcome),
            Err(fault) => {
                crate::debug_vm!(
                    self.id => "VM Fault at IP {} (step {}): {}",
                    self.state.ip,
                    self.state.steps,
                    fault
                );
                self.state.set_fault(fault.clone());
                Err(fault)
            }
        }
    }

    fn execute_step(&mut self) -> Result<StepOutcome, VMFault> {
        let ip = self.state.ip;
        let instr = Instruction::decode(&self.state.memory.read(ip), ip)?;
        let raw = self.state.raw_operands(instr.arity())?;
        crate::debug_instructions!(
            self.id => "Executing instruction at IP {}: {:?} {:?}",
            ip,
            instr.opcode,
            raw
        );

        self.state.status = Status::Running;
        let effect =
            self.executor
                .execute_instruction(&mut self.state, &instr, &raw, &mut self.input)?;

        let outcome = match effect {
            Effect::Continue => {
                self.state.advance_ip(instr.width())?;
                StepOutcome::Executed
            }
            Effect::Jump(target) => {
                self.state.ip = target;
                StepOutcome::Executed
            }
            Effect::Output(value) => {
                self.state.advance_ip(instr.width())?;
                self.output.push_back(value.clone());
                StepOutcome::Output(value)
            }
            Effect::AwaitingInput => {
                self.state.status = Status::AwaitingInput;
                return Ok(StepOutcome::AwaitingInput);
            }
            Effect::Halt => {
                self.state.status = Status::Halted;
                crate::debug_vm!(self.id => "Halted after {} steps", self.state.steps + 1);
                StepOutcome::Halted
            }
        };
        self.state.steps += 1;
        Ok(outcome)
    }

    /// Runs until the program halts or waits for input
    pub fn run(&mut self) -> Result<Status, VMFault> {
        loop {
            match self.step()? {
                StepOutcome::Halted => return Ok(Status::Halted),
                StepOutcome::AwaitingInput => return Ok(Status::AwaitingInput),
                StepOutcome::Executed | StepOutcome::Output(_) => {}
            }
        }
    }

    /// Like `run`, but stops after `max_steps` instructions and reports `Running`
    pub fn run_for(&mut self, max_steps: u64) -> Result<Status, VMFault> {
        for _ in 0..max_steps {
            match self.step()? {
                StepOutcome::Halted => return Ok(Status::Halted),
                StepOutcome::AwaitingInput => return Ok(Status::AwaitingInput),
                StepOutcome::Executed | StepOutcome::Output(_) => {}
            }
        }
        Ok(self.state.status)
    }
}
