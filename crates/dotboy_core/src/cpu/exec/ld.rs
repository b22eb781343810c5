use crate::cpu::dispatch::{Decoded, Flow};
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_ld_rr_d16(&mut self, _bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0x01 | 0x11 | 0x21 | 0x31));

        let rp = (op.opcode >> 4) & 0x03;
        self.write_rp(rp, op.imm16());
        Flow::Done
    }

    pub(in crate::cpu) fn exec_ld_r_d8(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(
            op.opcode,
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E
        ));

        let reg = (op.opcode >> 3) & 0x07;
        self.write_reg8(bus, reg, op.imm8());
        Flow::Done
    }

    /// LD r1, r2 over the 0x40–0x7F block (0x76 is HALT and never lands here).
    pub(in crate::cpu) fn exec_ld_r_r(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!((0x40..=0x7F).contains(&op.opcode) && op.opcode != 0x76);

        let dst = (op.opcode >> 3) & 0x07;
        let src = op.opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.write_reg8(bus, dst, value);
        Flow::Done
    }

    pub(in crate::cpu) fn exec_ld_a16_sp(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        bus.write16(op.imm16(), self.regs.sp);
        Flow::Done
    }

    pub(in crate::cpu) fn exec_ldh_a8(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0xE0 | 0xF0));

        let addr = 0xFF00 | op.imm8() as u16;
        match op.opcode {
            0xE0 => bus.write8(addr, self.regs.a()),
            _ => {
                let value = bus.read8(addr);
                self.regs.set_a(value);
            }
        }
        Flow::Done
    }

    pub(in crate::cpu) fn exec_ldh_c(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0xE2 | 0xF2));

        let addr = 0xFF00 | self.regs.c() as u16;
        match op.opcode {
            0xE2 => bus.write8(addr, self.regs.a()),
            _ => {
                let value = bus.read8(addr);
                self.regs.set_a(value);
            }
        }
        Flow::Done
    }

    pub(in crate::cpu) fn exec_ld_a16_a(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0xEA | 0xFA));

        let addr = op.imm16();
        match op.opcode {
            0xEA => bus.write8(addr, self.regs.a()),
            _ => {
                let value = bus.read8(addr);
                self.regs.set_a(value);
            }
        }
        Flow::Done
    }

    /// LD (BC), A / LD (DE), A / LD (HL+), A / LD (HL-), A
    pub(in crate::cpu) fn exec_ld_indirect_a(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0x02 | 0x12 | 0x22 | 0x32));

        let addr = self.indirect_address(op.opcode);
        bus.write8(addr, self.regs.a());
        Flow::Done
    }

    /// LD A, (BC) / LD A, (DE) / LD A, (HL+) / LD A, (HL-)
    pub(in crate::cpu) fn exec_ld_a_indirect(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0x0A | 0x1A | 0x2A | 0x3A));

        let addr = self.indirect_address(op.opcode);
        let value = bus.read8(addr);
        self.regs.set_a(value);
        Flow::Done
    }

    pub(in crate::cpu) fn exec_ld_sp_hl(&mut self, _bus: &mut dyn Bus, _op: Decoded) -> Flow {
        self.regs.sp = self.regs.hl();
        Flow::Done
    }

    /// Address for the A <-> (rr) forms, applying the HL post-increment or
    /// post-decrement.
    fn indirect_address(&mut self, opcode: u8) -> u16 {
        let hl = self.regs.hl();
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }
}
