use crate::cpu::alu::Direction;
use crate::cpu::dispatch::{Decoded, Flow};
use crate::cpu::{Bus, Cpu, Flags};

impl Cpu {
    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP with a register or (HL) operand.
    pub(in crate::cpu) fn exec_alu_reg_group(&mut self, bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!((0x80..=0xBF).contains(&op.opcode));

        let value = self.read_reg8(bus, op.opcode & 0x07);
        self.alu_dispatch((op.opcode >> 3) & 0x07, value);
        Flow::Done
    }

    /// The same eight operations with an 8-bit immediate operand.
    pub(in crate::cpu) fn exec_alu_imm(&mut self, _bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(
            op.opcode,
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE
        ));

        self.alu_dispatch((op.opcode >> 3) & 0x07, op.imm8());
        Flow::Done
    }

    fn alu_dispatch(&mut self, operation: u8, value: u8) {
        match operation {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            7 => self.alu_cp(value),
            _ => unreachable!(),
        }
    }

    /// RLCA, RRCA, RLA, RRA. Unlike the 0xCB forms these always clear Z.
    pub(in crate::cpu) fn exec_rotate_a(&mut self, _bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0x07 | 0x0F | 0x17 | 0x1F));

        let direction = if op.opcode & 0x08 == 0 {
            Direction::Left
        } else {
            Direction::Right
        };
        let through_carry = op.opcode & 0x10 != 0;

        let result = self.alu_rotate(self.regs.a(), direction, through_carry);
        self.regs.set_a(result);
        self.set_flag(Flags::ZERO, false);
        Flow::Done
    }

    pub(in crate::cpu) fn exec_add_hl_rr(&mut self, _bus: &mut dyn Bus, op: Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0x09 | 0x19 | 0x29 | 0x39));

        let value = self.read_rp((op.opcode >> 4) & 0x03);
        self.alu_add16_hl(value);
        Flow::Done
    }

    pub(in crate::cpu) fn exec_add_sp_r8(&mut self, _bus: &mut dyn Bus, op: Decoded) -> Flow {
        self.regs.sp = self.alu_add16_signed(self.regs.sp, op.imm8());
        Flow::Done
    }

    pub(in crate::cpu) fn exec_ld_hl_sp_r8(&mut self, _bus: &mut dyn Bus, op: Decoded) -> Flow {
        let result = self.alu_add16_signed(self.regs.sp, op.imm8());
        self.regs.set_hl(result);
        Flow::Done
    }

    pub(in crate::cpu) fn exec_daa(&mut self, _bus: &mut dyn Bus, _op: Decoded) -> Flow {
        self.alu_daa();
        Flow::Done
    }

    pub(in crate::cpu) fn exec_cpl(&mut self, _bus: &mut dyn Bus, _op: Decoded) -> Flow {
        self.regs.set_a(!self.regs.a());
        self.set_flag(Flags::HALF_CARRY, true);
        self.set_flag(Flags::SUBTRACT, true);
        Flow::Done
    }

    pub(in crate::cpu) fn exec_scf(&mut self, _bus: &mut dyn Bus, _op: Decoded) -> Flow {
        self.set_flag(Flags::CARRY, true);
        self.set_flag(Flags::HALF_CARRY, false);
        self.set_flag(Flags::SUBTRACT, false);
        Flow::Done
    }

    pub(in crate::cpu) fn exec_ccf(&mut self, _bus: &mut dyn Bus, _op: Decoded) -> Flow {
        let carry = self.get_flag(Flags::CARRY);
        self.set_flag(Flags::CARRY, !carry);
        self.set_flag(Flags::HALF_CARRY, false);
        self.set_flag(Flags::SUBTRACT, false);
        Flow::Done
    }
}
