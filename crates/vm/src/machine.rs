//! Machine state management: memory, registers, queues, lifecycle.

use std::collections::VecDeque;

use crate::error::RuntimeError;
use crate::memory::Memory;
use intcode_common::{Instruction, Mode, Program};

/// Lifecycle state of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Loaded (or empty) and not yet driven, or idle between single steps.
    #[default]
    Ready,
    /// Inside the dispatch loop. Never observable between calls.
    Running,
    /// Blocked on `input` with an empty queue.
    Suspended,
    /// Executed `halt`.
    Halted,
    /// Hit a fatal error; see [`Machine::fault`].
    Faulted,
}

/// An Intcode machine.
///
/// The machine owns its memory and queues exclusively. It is driven by
/// [`execute`](Machine::execute) (load and run) and [`run`](Machine::run)
/// (feed and resume); both return only the output produced by that call,
/// while [`output`](Machine::output) keeps the cumulative buffer.
#[derive(Debug, Clone, Default)]
pub struct Machine {
    /// Program and data.
    pub(crate) memory: Memory,
    /// Address of the next instruction.
    pub(crate) ip: usize,
    /// Base for relative-mode parameters.
    pub(crate) relative_base: i64,
    /// Pending input, consumed front first.
    pub(crate) input: VecDeque<i64>,
    /// Everything written by `output` since the last load.
    pub(crate) output: Vec<i64>,
    /// Current lifecycle state.
    pub(crate) state: State,
    /// The error that faulted the machine, if any.
    pub(crate) fault: Option<RuntimeError>,
}

impl Machine {
    /// Create an empty machine in the `Ready` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a machine with `program` loaded but not started.
    pub fn from_program(program: &Program) -> Self {
        let mut machine = Self::new();
        machine.load(program);
        machine
    }

    /// Load a program, resetting registers, queues and state.
    pub fn load(&mut self, program: &Program) {
        self.memory = Memory::new(program.cells.clone());
        self.ip = 0;
        self.relative_base = 0;
        self.input.clear();
        self.output.clear();
        self.state = State::Ready;
        self.fault = None;
    }

    /// Load `program`, enqueue `inputs`, and run until halt or suspension.
    ///
    /// Returns the output produced by this run.
    pub fn execute<I>(&mut self, program: &Program, inputs: I) -> Result<&[i64], RuntimeError>
    where
        I: IntoIterator<Item = i64>,
    {
        self.execute_with(program, inputs, None, None)
    }

    /// Like [`execute`](Machine::execute), but first overwrite cell 1 with
    /// `noun` and cell 2 with `verb` when given.
    pub fn execute_with<I>(
        &mut self,
        program: &Program,
        inputs: I,
        noun: Option<i64>,
        verb: Option<i64>,
    ) -> Result<&[i64], RuntimeError>
    where
        I: IntoIterator<Item = i64>,
    {
        self.load(program);
        if let Some(noun) = noun {
            self.memory.set(1, noun);
        }
        if let Some(verb) = verb {
            self.memory.set(2, verb);
        }
        self.run(inputs)
    }

    /// Append `inputs` and resume.
    ///
    /// Returns only the output produced during this call, not the
    /// cumulative buffer; see [`output`](Machine::output) for that. A halted
    /// machine drops the inputs and returns an empty slice without
    /// executing, so the deltas of all calls always add up to the
    /// cumulative buffer.
    pub fn run<I>(&mut self, inputs: I) -> Result<&[i64], RuntimeError>
    where
        I: IntoIterator<Item = i64>,
    {
        self.check_fault()?;
        let start = self.output.len();
        if self.state != State::Halted {
            self.input.extend(inputs);
            self.drive()?;
        }
        Ok(&self.output[start..])
    }

    /// Send `text` as ASCII input and resume.
    ///
    /// The text is sent verbatim; include the trailing newline if the
    /// program expects one. Returns the decoded output of this call.
    pub fn run_ascii(&mut self, text: &str) -> Result<(String, Vec<i64>), RuntimeError> {
        let delta = self.run(crate::ascii::encode(text))?;
        Ok(crate::ascii::decode(delta))
    }

    /// Enqueue input without resuming.
    pub fn push_input(&mut self, value: i64) {
        self.input.push_back(value);
    }

    /// Patch a memory cell, e.g. before the first run.
    pub fn write_memory(&mut self, address: usize, value: i64) {
        self.memory.set(address, value);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Address of the next instruction to execute.
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Current relative base.
    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    /// Read access to memory.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Cumulative output since the last load.
    pub fn output(&self) -> &[i64] {
        &self.output
    }

    /// Inputs queued but not yet consumed.
    pub fn pending_input(&self) -> &VecDeque<i64> {
        &self.input
    }

    /// The error that faulted the machine, if it faulted.
    pub fn fault(&self) -> Option<&RuntimeError> {
        self.fault.as_ref()
    }

    /// Returns true once the machine has executed `halt`.
    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    /// Fail with [`RuntimeError::Faulted`] if an earlier run failed.
    pub(crate) fn check_fault(&self) -> Result<(), RuntimeError> {
        match &self.fault {
            Some(cause) => Err(RuntimeError::Faulted(Box::new(cause.clone()))),
            None => Ok(()),
        }
    }

    // ---- Operand access ----

    /// Raw parameter cell `param` of the instruction at `ip`.
    fn parameter(&self, param: usize) -> i64 {
        self.memory.get(self.ip + 1 + param)
    }

    /// Convert a computed address, rejecting negatives.
    pub(crate) fn checked_address(&self, address: i64) -> Result<usize, RuntimeError> {
        usize::try_from(address).map_err(|_| RuntimeError::NegativeAddress { at: self.ip, address })
    }

    /// Resolve parameter `param` to the address it names.
    pub(crate) fn address_of(
        &self,
        instr: &Instruction,
        param: usize,
    ) -> Result<usize, RuntimeError> {
        let raw = self.parameter(param);
        let address = match instr.mode(param) {
            Mode::Position => raw,
            Mode::Relative => self.relative_base.wrapping_add(raw),
            Mode::Immediate => {
                return Err(RuntimeError::InvalidAddressingMode {
                    at: self.ip,
                    mode: Mode::Immediate.digit(),
                    param,
                })
            }
        };
        self.checked_address(address)
    }

    /// Fetch the operand value of parameter `param`.
    pub(crate) fn read(&self, instr: &Instruction, param: usize) -> Result<i64, RuntimeError> {
        match instr.mode(param) {
            Mode::Immediate => Ok(self.parameter(param)),
            Mode::Position | Mode::Relative => Ok(self.memory.get(self.address_of(instr, param)?)),
        }
    }

    /// Store `value` at the destination named by parameter `param`.
    pub(crate) fn write(
        &mut self,
        instr: &Instruction,
        param: usize,
        value: i64,
    ) -> Result<(), RuntimeError> {
        let address = self.address_of(instr, param)?;
        self.memory.set(address, value);
        Ok(())
    }
}
