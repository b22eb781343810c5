use crate::cpu::dispatch::{Decoded, Flow};
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_jr(&mut self, _bus: &mut dyn Bus, op: Decoded) -> Flow {
        self.jr(op.imm8(), true)
    }

    pub(in crate::cpu) fn exec_jr_cc(&mut self, _bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0x20 | 0x28 | 0x30 | 0x38));
        let cc = (op.opcode >> 3) & 0x03;
        self.jr(op.imm8(), self.cc_condition(cc))
    }

    pub(in crate::cpu) fn exec_jp_cc(&mut self, _bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0xC2 | 0xCA | 0xD2 | 0xDA));
        let cc = (op.opcode >> 3) & 0x03;
        self.jp_cond(op.imm16(), self.cc_condition(cc))
    }

    pub(in crate::cpu) fn exec_jp_a16(&mut self, _bus: &mut dyn Bus, op: Decoded) -> Flow {
        self.regs.pc = op.imm16();
        Flow::Done
    }

    pub(in crate::cpu) fn exec_jp_hl(&mut self, _bus: &mut dyn Bus, _op: Decoded) -> Flow {
        self.regs.pc = self.regs.hl();
        Flow::Done
    }

    pub(in crate::cpu) fn exec_call_cc(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0xC4 | 0xCC | 0xD4 | 0xDC));
        let cc = (op.opcode >> 3) & 0x03;
        self.call_cond(bus, op.imm16(), self.cc_condition(cc))
    }

    pub(in crate::cpu) fn exec_ret_cc(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0xC0 | 0xC8 | 0xD0 | 0xD8));
        let cc = (op.opcode >> 3) & 0x03;
        self.ret_cond(bus, self.cc_condition(cc))
    }
}
