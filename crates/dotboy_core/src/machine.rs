use std::fmt;

use crate::cpu::{BootState, Cpu, CpuSnapshot};
use crate::error::{Error, Result};
use crate::memory::Memory;

/// One CPU wired to one address space.
///
/// Machines share nothing; the only global state in the crate is the
/// immutable opcode tables.
pub struct Machine {
    pub cpu: Cpu,
    pub memory: Memory,
}

/// Why [`Machine::run`] returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The step budget ran out.
    StepBudget,
    /// `step` failed; CPU state is as it was before the failing call.
    Fault(Error),
    /// The CPU is halted and no enabled interrupt is requested, so nothing
    /// would ever run again.
    Halted,
    /// A STOP instruction executed.
    Stopped,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::StepBudget => f.write_str("step budget exhausted"),
            StopReason::Fault(err) => write!(f, "{err}"),
            StopReason::Halted => f.write_str("halted with no interrupt pending"),
            StopReason::Stopped => f.write_str("STOP executed"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed successfully.
    pub steps: u64,
    /// T-cycles charged across those steps.
    pub cycles: u64,
    pub stop: StopReason,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} steps, {} cycles: {}",
            self.steps, self.cycles, self.stop
        )
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Self::with_boot_state(BootState::default())
    }

    pub fn with_boot_state(boot: BootState) -> Self {
        Self {
            cpu: Cpu::with_boot_state(boot),
            memory: Memory::new(),
        }
    }

    /// Insert a cartridge, reset memory to its power-on contents and put the
    /// CPU back into its boot state.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.memory.load_rom(rom)?;
        self.cpu.reset();
        Ok(())
    }

    /// Execute one instruction; see [`Cpu::step`].
    pub fn step(&mut self) -> Result<u32> {
        self.cpu.step(&mut self.memory)
    }

    /// See [`Cpu::force_pc`].
    pub fn force_pc(&mut self, addr: u16, execute: bool) -> Result<u32> {
        self.cpu.force_pc(&mut self.memory, addr, execute)
    }

    pub fn snapshot(&self) -> CpuSnapshot {
        self.cpu.snapshot()
    }

    pub fn serial_output(&self) -> &[u8] {
        self.memory.serial_output()
    }

    /// Step until `max_steps` instructions have run or execution can't
    /// usefully continue.
    pub fn run(&mut self, max_steps: u64) -> RunSummary {
        self.run_with(max_steps, |_, _| {})
    }

    /// Like [`Machine::run`], calling `before_step` ahead of every
    /// instruction (tracing, breakpoints in tests).
    pub fn run_with<F>(&mut self, max_steps: u64, mut before_step: F) -> RunSummary
    where
        F: FnMut(&Cpu, &mut Memory),
    {
        let mut steps = 0;
        let mut cycles = 0;

        let stop = loop {
            if steps >= max_steps {
                break StopReason::StepBudget;
            }
            if self.cpu.halted && !self.cpu.interrupt_pending(&mut self.memory) {
                break StopReason::Halted;
            }

            before_step(&self.cpu, &mut self.memory);
            match self.cpu.step(&mut self.memory) {
                Ok(spent) => {
                    steps += 1;
                    cycles += u64::from(spent);
                }
                Err(err) => break StopReason::Fault(err),
            }

            if self.cpu.is_stopped() {
                break StopReason::Stopped;
            }
        };

        log::debug!("run finished after {steps} steps ({cycles} cycles): {stop}");
        RunSummary {
            steps,
            cycles,
            stop,
        }
    }
}

#[cfg(test)]
mod tests;
