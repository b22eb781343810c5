mod alu;
mod bus;
mod cb;
mod dispatch;
mod exec;
mod helpers;
mod init;
mod mnemonics;
mod regs;
mod snapshot;

pub use bus::Bus;
pub use dispatch::{cb_opcode_info, opcode_info, OpcodeInfo};
pub use init::BootState;
pub use regs::{Flags, RegisterPair, Registers};
pub use snapshot::CpuSnapshot;

/// Interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;
/// Interrupt request register (IF).
pub const IF_ADDR: u16 = 0xFF0F;

/// Game Boy CPU core.
///
/// All execution state lives here; two `Cpu` values never share anything,
/// so independent cores can run side by side (for example in parallel
/// tests). The only transition is [`Cpu::step`].
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// Set by STOP and cleared when the next instruction executes.
    stopped: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    boot: BootState,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flags) -> bool {
        self.regs.flag(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        self.regs.set_flag(flag, value);
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.set_flags(Flags::empty());
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// True while an EI is waiting for the following instruction to finish.
    #[inline]
    pub fn ime_pending(&self) -> bool {
        self.ime_enable_pending || self.ime_enable_delay
    }

    fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            // Second step after EI: actually enable IME.
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            // First step after EI: arm the delayed enable.
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
