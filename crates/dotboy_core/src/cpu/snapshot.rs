use std::fmt;

use super::{Cpu, Flags, RegisterPair};

/// Point-in-time copy of the CPU's visible state.
///
/// Registers mutate in place on every step, so debuggers and frontends take
/// one of these instead of holding on to the live `Cpu`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub af: RegisterPair,
    pub bc: RegisterPair,
    pub de: RegisterPair,
    pub hl: RegisterPair,
    pub sp: u16,
    pub pc: u16,
    pub flags: Flags,
    pub ime: bool,
    pub halted: bool,
    pub stopped: bool,
}

impl Cpu {
    pub fn snapshot(&self) -> CpuSnapshot {
        let [af, bc, de, hl] = self.regs.pairs();
        CpuSnapshot {
            af,
            bc,
            de,
            hl,
            sp: self.regs.sp,
            pc: self.regs.pc,
            flags: self.regs.flags(),
            ime: self.ime,
            halted: self.halted,
            stopped: self.stopped,
        }
    }
}

impl fmt::Display for CpuSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |flag: Flags, c: char| if self.flags.contains(flag) { c } else { '-' };
        write!(
            f,
            "PC={:04X} SP={:04X} AF={:04X} BC={:04X} DE={:04X} HL={:04X} [{}{}{}{}] IME={}",
            self.pc,
            self.sp,
            self.af.word(),
            self.bc.word(),
            self.de.word(),
            self.hl.word(),
            flag(Flags::ZERO, 'Z'),
            flag(Flags::SUBTRACT, 'N'),
            flag(Flags::HALF_CARRY, 'H'),
            flag(Flags::CARRY, 'C'),
            u8::from(self.ime),
        )?;
        if self.halted {
            write!(f, " HALT")?;
        }
        if self.stopped {
            write!(f, " STOP")?;
        }
        Ok(())
    }
}
