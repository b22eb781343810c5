use crate::cpu::dispatch::{Decoded, Flow};
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_push_rr(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));

        let value = self.read_rp2((op.opcode >> 4) & 0x03);
        self.push_u16(bus, value);
        Flow::Done
    }

    /// POP AF drops the low nibble of F, like every other write to F.
    pub(in crate::cpu) fn exec_pop_rr(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));

        let value = self.pop_u16(bus);
        self.write_rp2((op.opcode >> 4) & 0x03, value);
        Flow::Done
    }

    pub(in crate::cpu) fn exec_rst(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(
            op.opcode,
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF
        ));

        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = (op.opcode & 0x38) as u16;
        Flow::Done
    }

    pub(in crate::cpu) fn exec_call_a16(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        self.call_cond(bus, op.imm16(), true)
    }

    pub(in crate::cpu) fn exec_ret(&mut self, bus: &mut dyn Bus, _op: Decoded) -> Flow {
        self.ret_cond(bus, true)
    }

    pub(in crate::cpu) fn exec_reti(&mut self, bus: &mut dyn Bus, _op: Decoded) -> Flow {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
        Flow::Done
    }
}
