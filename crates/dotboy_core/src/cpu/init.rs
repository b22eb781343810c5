use typed_builder::TypedBuilder;

use super::{Cpu, Registers};

/// Register values the CPU starts from.
///
/// Defaults match the DMG boot ROM's state when it hands control to the
/// cartridge at 0x0100 (Pan Docs, "Power Up Sequence").
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct BootState {
    #[builder(default = 0x01B0)]
    pub af: u16,
    #[builder(default = 0x0013)]
    pub bc: u16,
    #[builder(default = 0x00D8)]
    pub de: u16,
    #[builder(default = 0x014D)]
    pub hl: u16,
    #[builder(default = 0xFFFE)]
    pub sp: u16,
    #[builder(default = 0x0100)]
    pub pc: u16,
}

impl Default for BootState {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_boot_state(BootState::default())
    }

    pub fn with_boot_state(boot: BootState) -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            boot,
        };
        cpu.apply_boot_state();
        cpu
    }

    /// Reset the CPU to the boot state it was created with.
    pub fn reset(&mut self) {
        self.halted = false;
        self.stopped = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        self.apply_boot_state();
    }

    pub fn boot_state(&self) -> BootState {
        self.boot
    }

    fn apply_boot_state(&mut self) {
        let boot = self.boot;
        self.regs.set_af(boot.af);
        self.regs.set_bc(boot.bc);
        self.regs.set_de(boot.de);
        self.regs.set_hl(boot.hl);
        self.regs.sp = boot.sp;
        self.regs.pc = boot.pc;

        // IME is clear when control reaches the cartridge; software
        // enables interrupts itself via EI/RETI.
        self.ime = false;
    }
}
