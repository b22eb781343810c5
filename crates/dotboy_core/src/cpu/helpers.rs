use super::dispatch::Flow;
use super::{Bus, Cpu, Flags};

impl Cpu {
    /// Read an 8-bit register or (HL) by index.
    ///
    /// The encoding matches the standard Game Boy register order used by
    /// opcode tables:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
    #[inline]
    pub(super) fn read_reg8(&mut self, bus: &mut dyn Bus, index: u8) -> u8 {
        match index {
            0 => self.regs.b(),
            1 => self.regs.c(),
            2 => self.regs.d(),
            3 => self.regs.e(),
            4 => self.regs.h(),
            5 => self.regs.l(),
            6 => bus.read8(self.regs.hl()),
            7 => self.regs.a(),
            _ => unreachable!("register index {index} out of range"),
        }
    }

    /// Write an 8-bit register or (HL) by index. The encoding matches
    /// `read_reg8`.
    #[inline]
    pub(super) fn write_reg8(&mut self, bus: &mut dyn Bus, index: u8, value: u8) {
        match index {
            0 => self.regs.set_b(value),
            1 => self.regs.set_c(value),
            2 => self.regs.set_d(value),
            3 => self.regs.set_e(value),
            4 => self.regs.set_h(value),
            5 => self.regs.set_l(value),
            6 => bus.write8(self.regs.hl(), value),
            7 => self.regs.set_a(value),
            _ => unreachable!("register index {index} out of range"),
        }
    }

    /// 16-bit register by `rp` index: 0=BC, 1=DE, 2=HL, 3=SP.
    #[inline]
    pub(super) fn read_rp(&self, index: u8) -> u16 {
        match index {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            3 => self.regs.sp,
            _ => unreachable!("register pair index {index} out of range"),
        }
    }

    #[inline]
    pub(super) fn write_rp(&mut self, index: u8, value: u16) {
        match index {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            3 => self.regs.sp = value,
            _ => unreachable!("register pair index {index} out of range"),
        }
    }

    /// 16-bit register by `rp2` index (PUSH/POP): 0=BC, 1=DE, 2=HL, 3=AF.
    #[inline]
    pub(super) fn read_rp2(&self, index: u8) -> u16 {
        match index {
            3 => self.regs.af(),
            _ => self.read_rp(index),
        }
    }

    #[inline]
    pub(super) fn write_rp2(&mut self, index: u8, value: u16) {
        match index {
            3 => self.regs.set_af(value),
            _ => self.write_rp(index, value),
        }
    }

    /// Condition code by `cc` index: 0=NZ, 1=Z, 2=NC, 3=C.
    #[inline]
    pub(super) fn cc_condition(&self, cc: u8) -> bool {
        match cc {
            0 => !self.get_flag(Flags::ZERO),
            1 => self.get_flag(Flags::ZERO),
            2 => !self.get_flag(Flags::CARRY),
            3 => self.get_flag(Flags::CARRY),
            _ => unreachable!("condition index {cc} out of range"),
        }
    }

    /// Push high byte at SP-1, then low byte at SP-2.
    #[inline]
    pub(super) fn push_u16(&mut self, bus: &mut dyn Bus, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = bus.read8(self.regs.sp);
        let hi = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    /// Relative jump used by JR/JR cc. PC already points past the operand.
    pub(super) fn jr(&mut self, offset: u8, cond: bool) -> Flow {
        if !cond {
            return Flow::NotTaken;
        }
        self.regs.pc = self.regs.pc.wrapping_add(offset as i8 as u16);
        Flow::Done
    }

    pub(super) fn jp_cond(&mut self, addr: u16, cond: bool) -> Flow {
        if !cond {
            return Flow::NotTaken;
        }
        self.regs.pc = addr;
        Flow::Done
    }

    pub(super) fn call_cond(&mut self, bus: &mut dyn Bus, addr: u16, cond: bool) -> Flow {
        if !cond {
            return Flow::NotTaken;
        }
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = addr;
        Flow::Done
    }

    pub(super) fn ret_cond(&mut self, bus: &mut dyn Bus, cond: bool) -> Flow {
        if !cond {
            return Flow::NotTaken;
        }
        self.regs.pc = self.pop_u16(bus);
        Flow::Done
    }
}
