use super::alu::{Direction, Shift};
use super::dispatch::{Decoded, Flow};
use super::{Bus, Cpu};

// 0xCB-prefixed instructions decode as x = bits 7..6 (group), y = bits 5..3
// (operation or bit index) and z = bits 2..0 (register, 6 = (HL)).

impl Cpu {
    /// RLC, RRC, RL, RR, SLA, SRA, SWAP, SRL.
    pub(super) fn exec_cb_shift(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(op.opcode < 0x40);

        let z = op.opcode & 0x07;
        let value = self.read_reg8(bus, z);
        let result = match (op.opcode >> 3) & 0x07 {
            0 => self.alu_rotate(value, Direction::Left, false),
            1 => self.alu_rotate(value, Direction::Right, false),
            2 => self.alu_rotate(value, Direction::Left, true),
            3 => self.alu_rotate(value, Direction::Right, true),
            4 => self.alu_shift(value, Shift::LeftArithmetic),
            5 => self.alu_shift(value, Shift::RightArithmetic),
            6 => self.alu_swap(value),
            7 => self.alu_shift(value, Shift::RightLogical),
            _ => unreachable!(),
        };
        self.write_reg8(bus, z, result);
        Flow::Done
    }

    pub(super) fn exec_cb_bit(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!((0x40..0x80).contains(&op.opcode));

        let value = self.read_reg8(bus, op.opcode & 0x07);
        self.alu_bit(value, (op.opcode >> 3) & 0x07);
        Flow::Done
    }

    pub(super) fn exec_cb_res(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!((0x80..0xC0).contains(&op.opcode));

        let z = op.opcode & 0x07;
        let bit = (op.opcode >> 3) & 0x07;
        let value = self.read_reg8(bus, z) & !(1 << bit);
        self.write_reg8(bus, z, value);
        Flow::Done
    }

    pub(super) fn exec_cb_set(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(op.opcode >= 0xC0);

        let z = op.opcode & 0x07;
        let bit = (op.opcode >> 3) & 0x07;
        let value = self.read_reg8(bus, z) | (1 << bit);
        self.write_reg8(bus, z, value);
        Flow::Done
    }
}
