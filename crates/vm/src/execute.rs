//! Main execution loop and opcode dispatch for the Intcode machine.

use crate::error::RuntimeError;
use crate::machine::{Machine, State};
use intcode_common::{Instruction, Opcode};

/// Outcome of executing a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The instruction completed; the next one is ready.
    Continue,
    /// `input` found the queue empty. The instruction pointer was not moved.
    Blocked,
    /// `halt` executed.
    Halted,
}

impl Machine {
    /// Run until halt or until `input` blocks on an empty queue.
    ///
    /// Leaves the machine `Halted`, `Suspended` or, on error, `Faulted`.
    pub(crate) fn drive(&mut self) -> Result<(), RuntimeError> {
        self.state = State::Running;
        loop {
            match self.execute_one() {
                Ok(Step::Continue) => {}
                Ok(Step::Blocked) => {
                    self.state = State::Suspended;
                    return Ok(());
                }
                Ok(Step::Halted) => {
                    self.state = State::Halted;
                    return Ok(());
                }
                Err(e) => {
                    self.state = State::Faulted;
                    self.fault = Some(e.clone());
                    return Err(e);
                }
            }
        }
    }

    /// Execute exactly one instruction.
    ///
    /// A halted machine reports `Halted` without executing. After a
    /// completed instruction the machine is back in `Ready`.
    pub fn step(&mut self) -> Result<Step, RuntimeError> {
        self.check_fault()?;
        if self.state == State::Halted {
            return Ok(Step::Halted);
        }

        self.state = State::Running;
        let result = self.execute_one();
        self.state = match result {
            Ok(Step::Continue) => State::Ready,
            Ok(Step::Blocked) => State::Suspended,
            Ok(Step::Halted) => State::Halted,
            Err(ref e) => {
                self.fault = Some(e.clone());
                State::Faulted
            }
        };
        result
    }

    /// Decode and execute the instruction at `ip`.
    fn execute_one(&mut self) -> Result<Step, RuntimeError> {
        let at = self.ip;
        let instr = Instruction::decode(self.memory.get(at))
            .map_err(|e| RuntimeError::decode(at, e))?;

        match instr.opcode {
            Opcode::Add => self.exec_binary(&instr, i64::wrapping_add)?,
            Opcode::Mul => self.exec_binary(&instr, i64::wrapping_mul)?,
            Opcode::Input => {
                let dst = self.address_of(&instr, 0)?;
                match self.input.pop_front() {
                    Some(value) => self.memory.set(dst, value),
                    None => return Ok(Step::Blocked),
                }
            }
            Opcode::Output => {
                let value = self.read(&instr, 0)?;
                self.output.push(value);
            }
            Opcode::JumpIfTrue => {
                if self.exec_jump(&instr, |a| a != 0)? {
                    return Ok(Step::Continue);
                }
            }
            Opcode::JumpIfFalse => {
                if self.exec_jump(&instr, |a| a == 0)? {
                    return Ok(Step::Continue);
                }
            }
            Opcode::LessThan => self.exec_binary(&instr, |a, b| i64::from(a < b))?,
            Opcode::Equals => self.exec_binary(&instr, |a, b| i64::from(a == b))?,
            Opcode::AdjustRelativeBase => {
                let offset = self.read(&instr, 0)?;
                self.relative_base = self.relative_base.wrapping_add(offset);
            }
            Opcode::Halt => return Ok(Step::Halted),
        }

        self.ip += instr.len();
        Ok(Step::Continue)
    }

    /// Three-parameter form: `dst <- op(a, b)`.
    fn exec_binary(
        &mut self,
        instr: &Instruction,
        op: fn(i64, i64) -> i64,
    ) -> Result<(), RuntimeError> {
        let a = self.read(instr, 0)?;
        let b = self.read(instr, 1)?;
        self.write(instr, 2, op(a, b))
    }

    /// Conditional jump. Returns true if the jump was taken.
    fn exec_jump(&mut self, instr: &Instruction, cond: fn(i64) -> bool) -> Result<bool, RuntimeError> {
        let a = self.read(instr, 0)?;
        if !cond(a) {
            return Ok(false);
        }
        let target = self.read(instr, 1)?;
        self.ip = self.checked_address(target)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intcode_common::Program;

    fn machine(cells: &[i64]) -> Machine {
        Machine::from_program(&Program::new(cells.to_vec()))
    }

    #[test]
    fn step_add_then_halt() {
        let mut m = machine(&[1101, 2, 3, 5, 99, 0]);
        assert_eq!(m.step(), Ok(Step::Continue));
        assert_eq!(m.state(), State::Ready);
        assert_eq!(m.ip(), 4);
        assert_eq!(m.memory().get(5), 5);
        assert_eq!(m.step(), Ok(Step::Halted));
        assert_eq!(m.state(), State::Halted);
        assert_eq!(m.step(), Ok(Step::Halted));
        assert_eq!(m.ip(), 4);
    }

    #[test]
    fn step_blocks_on_empty_input() {
        let mut m = machine(&[3, 3, 99, 0]);
        assert_eq!(m.step(), Ok(Step::Blocked));
        assert_eq!(m.state(), State::Suspended);
        assert_eq!(m.ip(), 0);
        m.push_input(7);
        assert_eq!(m.step(), Ok(Step::Continue));
        assert_eq!(m.memory().get(3), 7);
    }

    #[test]
    fn less_than_and_equals_write_flags() {
        let mut m = machine(&[1107, 1, 2, 9, 1108, 3, 4, 10, 99, -1, -1]);
        m.run([]).unwrap();
        assert_eq!(m.memory().get(9), 1);
        assert_eq!(m.memory().get(10), 0);
    }

    #[test]
    fn jump_taken_sets_ip_absolutely() {
        // jnz #1 #5 ; hlt ; hlt ; out #5 ; hlt
        let mut m = machine(&[1105, 1, 5, 99, 99, 104, 5, 99]);
        assert_eq!(m.step(), Ok(Step::Continue));
        assert_eq!(m.ip(), 5);
        m.run([]).unwrap();
        assert_eq!(m.output(), &[5]);
    }

    #[test]
    fn jump_not_taken_falls_through_by_three() {
        let mut m = machine(&[1106, 1, 100, 99]);
        assert_eq!(m.step(), Ok(Step::Continue));
        assert_eq!(m.ip(), 3);
    }

    #[test]
    fn relative_base_moves_by_operand() {
        let mut m = machine(&[109, 10, 209, 0, 99, 0, 0, 0, 0, 0, -4]);
        m.run([]).unwrap();
        // rb = 10, then rb += memory[10] = -4
        assert_eq!(m.relative_base(), 6);
    }

    #[test]
    fn relative_write_and_read() {
        // arb #7 ; in [rb+1] ; out [rb+1] ; hlt
        let mut m = machine(&[109, 7, 203, 1, 204, 1, 99]);
        assert_eq!(m.run([11]).unwrap(), &[11]);
        assert_eq!(m.memory().get(8), 11);
    }

    #[test]
    fn negative_position_read_is_an_error() {
        let mut m = machine(&[4, -1, 99]);
        assert_eq!(
            m.run([]),
            Err(RuntimeError::NegativeAddress { at: 0, address: -1 })
        );
        assert_eq!(m.state(), State::Faulted);
    }

    #[test]
    fn negative_relative_write_is_an_error() {
        let mut m = machine(&[109, -5, 21101, 1, 1, 0, 99]);
        assert_eq!(
            m.run([]),
            Err(RuntimeError::NegativeAddress { at: 2, address: -5 })
        );
    }

    #[test]
    fn negative_jump_target_is_an_error() {
        let mut m = machine(&[1105, 1, -3, 99]);
        assert_eq!(
            m.run([]),
            Err(RuntimeError::NegativeAddress { at: 0, address: -3 })
        );
    }

    #[test]
    fn invalid_mode_digit_is_an_error() {
        let mut m = machine(&[304, 0, 99]);
        assert_eq!(
            m.run([]),
            Err(RuntimeError::InvalidAddressingMode {
                at: 0,
                mode: 3,
                param: 0
            })
        );
    }

    #[test]
    fn immediate_destination_is_an_error() {
        let mut m = machine(&[11101, 1, 1, 0, 99]);
        assert_eq!(
            m.run([]),
            Err(RuntimeError::InvalidAddressingMode {
                at: 0,
                mode: 1,
                param: 2
            })
        );
    }

    #[test]
    fn running_off_the_end_hits_opcode_zero() {
        let mut m = machine(&[1101, 1, 1, 0]);
        assert_eq!(
            m.run([]),
            Err(RuntimeError::InvalidOpcode { at: 4, opcode: 0 })
        );
    }

    #[test]
    fn arithmetic_wraps() {
        let mut m = machine(&[1101, i64::MAX, 1, 5, 99, 0]);
        m.run([]).unwrap();
        assert_eq!(m.memory().get(5), i64::MIN);
    }
}
