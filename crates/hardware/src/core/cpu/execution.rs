//! Main Execution Loop.
//!
//! This module implements the fetch-decode-execute cycle. It performs the following:
//! 1. **Fetch:** Reads the opcode (and operand, if any) through the instruction cache.
//! 2. **Decode:** Maps the opcode byte onto a [`Mnemonic`] once; dispatch is an exhaustive match.
//! 3. **Execute:** Updates AC/VAC through the data cache and advances or redirects PC.
//! 4. **Run Mode:** Repeats single steps until the machine stops or the loop guard trips.
//!
//! Each step is atomic with respect to the caller. Faults are returned as
//! values, never raised.

use serde::Serialize;
use tracing::{info, trace, warn};

use super::{Cpu, ExecState, TraceEntry};
use crate::common::{Fault, VECTOR_LANES};
use crate::isa::instruction::{Arity, Mnemonic};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome")]
pub enum RunOutcome {
    /// An HLT instruction was executed.
    Halted,
    /// A fatal fault stopped execution.
    Faulted {
        /// What went wrong.
        fault: Fault,
    },
    /// The step guard was reached first; the machine is still RUNNING.
    LoopGuardTripped,
}

/// Result of a run: the outcome and how many instructions were executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Instructions executed during this run.
    ///
    /// The final HLT is an executed instruction and counts; a faulting fetch
    /// executes nothing and does not. A program of `LDA 10` then `HLT` reports 2.
    pub steps: u32,
}

impl Cpu {
    /// Executes one instruction.
    ///
    /// Does nothing when the machine is already HALTED or FAULTED; the terminal
    /// state is returned again until the next reset.
    ///
    /// # Returns
    ///
    /// The execution state after the step.
    pub fn step(&mut self) -> ExecState {
        if self.state.is_terminal() {
            return self.state;
        }

        let Ok(pc) = u8::try_from(self.regs.pc) else {
            return self.fault(Fault::PcOutOfBounds { pc: self.regs.pc });
        };

        let opcode = self.fetch(pc);
        let Some(mnemonic) = Mnemonic::from_opcode(opcode) else {
            return self.fault(Fault::InvalidOpcode { opcode, pc });
        };

        let operand = match mnemonic.arity() {
            Arity::Address => Some(pc.checked_add(1).map_or(0, |next| self.fetch(next))),
            Arity::Implied => None,
        };

        trace!(%mnemonic, ?operand, pc, "executing");
        self.record(TraceEntry {
            pc,
            mnemonic,
            operand,
        });
        self.stats.record(mnemonic);

        self.execute(mnemonic, pc, operand.unwrap_or(0));
        self.state
    }

    /// Steps until the machine stops or `guard` steps have been executed.
    ///
    /// When the guard trips the machine is left RUNNING, exactly as it was after
    /// the last step. Calling this on a stopped machine returns its terminal
    /// outcome with zero steps.
    pub fn run(&mut self, guard: u32) -> RunReport {
        let mut steps = 0u32;
        let outcome = loop {
            match self.state {
                ExecState::Halted => break RunOutcome::Halted,
                ExecState::Faulted { fault } => break RunOutcome::Faulted { fault },
                ExecState::Running => {}
            }
            if steps >= guard {
                warn!(steps, "infinite loop detected: step guard reached");
                break RunOutcome::LoopGuardTripped;
            }
            // A fault stops before anything executes; HLT itself counts.
            if !matches!(self.step(), ExecState::Faulted { .. }) {
                steps += 1;
            }
        };
        info!(steps, ?outcome, "run finished");
        RunReport { outcome, steps }
    }

    /// Moves to FAULTED and reports it.
    fn fault(&mut self, fault: Fault) -> ExecState {
        warn!(%fault, "execution fault");
        self.stats.faults += 1;
        self.state = ExecState::Faulted { fault };
        self.state
    }

    /// Advances PC past the current instruction.
    #[inline]
    const fn advance(&mut self, pc: u8, size: u16) {
        self.regs.pc = pc as u16 + size;
    }

    /// Applies one decoded instruction.
    fn execute(&mut self, mnemonic: Mnemonic, pc: u8, operand: u8) {
        let size = mnemonic.size() as u16;
        match mnemonic {
            Mnemonic::Nop => self.advance(pc, size),
            Mnemonic::Sta => {
                self.store(operand, self.regs.ac());
                self.advance(pc, size);
            }
            Mnemonic::Lda => {
                let value = self.load(operand);
                self.regs.set_ac(value);
                self.advance(pc, size);
            }
            Mnemonic::Add => {
                let value = self.load(operand);
                self.regs.set_ac(self.regs.ac().wrapping_add(value));
                self.advance(pc, size);
            }
            Mnemonic::Or => {
                let value = self.load(operand);
                self.regs.set_ac(self.regs.ac() | value);
                self.advance(pc, size);
            }
            Mnemonic::And => {
                let value = self.load(operand);
                self.regs.set_ac(self.regs.ac() & value);
                self.advance(pc, size);
            }
            Mnemonic::Not => {
                self.regs.set_ac(!self.regs.ac());
                self.advance(pc, size);
            }
            Mnemonic::Jmp => self.jump(operand),
            Mnemonic::Jn => {
                if self.regs.negative() {
                    self.jump(operand);
                } else {
                    self.advance(pc, size);
                }
            }
            Mnemonic::Jz => {
                if self.regs.zero() {
                    self.jump(operand);
                } else {
                    self.advance(pc, size);
                }
            }
            Mnemonic::Hlt => {
                info!(pc, "Program halted");
                self.state = ExecState::Halted;
            }
            Mnemonic::Vld => {
                for (lane, addr) in Self::lane_addresses(operand).into_iter().enumerate() {
                    if let Some(addr) = addr {
                        self.regs.vac[lane] = self.load(addr);
                    }
                }
                self.advance(pc, size);
            }
            Mnemonic::Vst => {
                for (lane, addr) in Self::lane_addresses(operand).into_iter().enumerate() {
                    if let Some(addr) = addr {
                        self.store(addr, self.regs.vac[lane]);
                    }
                }
                self.advance(pc, size);
            }
            Mnemonic::Vadd => {
                self.lanewise(operand, u8::wrapping_add);
                self.advance(pc, size);
            }
            Mnemonic::Vor => {
                self.lanewise(operand, |a, b| a | b);
                self.advance(pc, size);
            }
            Mnemonic::Vand => {
                self.lanewise(operand, |a, b| a & b);
                self.advance(pc, size);
            }
            Mnemonic::Veadd => {
                let ac = self.regs.ac();
                for lane in 0..VECTOR_LANES {
                    self.regs.vac[lane] = self.regs.vac[lane].wrapping_add(ac);
                }
                self.advance(pc, size);
            }
            Mnemonic::Vnot => {
                for lane in 0..VECTOR_LANES {
                    self.regs.vac[lane] = !self.regs.vac[lane];
                }
                self.advance(pc, size);
            }
        }
    }

    /// Redirects PC to `target`.
    fn jump(&mut self, target: u8) {
        self.stats.branches_taken += 1;
        self.regs.pc = u16::from(target);
    }

    /// Combines every in-range lane of VAC with the vector at `start`.
    fn lanewise(&mut self, start: u8, op: impl Fn(u8, u8) -> u8) {
        for (lane, addr) in Self::lane_addresses(start).into_iter().enumerate() {
            if let Some(addr) = addr {
                let value = self.load(addr);
                self.regs.vac[lane] = op(self.regs.vac[lane], value);
            }
        }
    }
}
