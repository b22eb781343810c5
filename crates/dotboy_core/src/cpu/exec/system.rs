use crate::cpu::dispatch::{Decoded, Flow};
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_nop(&mut self, _bus: &mut dyn Bus, _op: Decoded) -> Flow {
        Flow::Done
    }

    /// STOP is two bytes long and only valid as `10 00`.
    pub(in crate::cpu) fn exec_stop(&mut self, _bus: &mut dyn Bus, op: Decoded) -> Flow {
        if op.imm8() != 0x00 {
            return Flow::Invalid;
        }
        self.stopped = true;
        Flow::Done
    }

    pub(in crate::cpu) fn exec_halt(&mut self, _bus: &mut dyn Bus, _op: Decoded) -> Flow {
        self.halted = true;
        Flow::Done
    }

    pub(in crate::cpu) fn exec_di(&mut self, _bus: &mut dyn Bus, _op: Decoded) -> Flow {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        Flow::Done
    }

    pub(in crate::cpu) fn exec_ei(&mut self, _bus: &mut dyn Bus, _op: Decoded) -> Flow {
        // IME becomes 1 after the *next* instruction completes.
        self.ime_enable_pending = true;
        Flow::Done
    }
}
