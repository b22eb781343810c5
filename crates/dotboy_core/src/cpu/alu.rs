use super::{Cpu, Flags};

/// Rotate direction for RLC/RL/RRC/RR and the accumulator forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Direction {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Shift {
    /// SLA: bit 0 becomes 0.
    LeftArithmetic,
    /// SRA: bit 7 is kept.
    RightArithmetic,
    /// SRL: bit 7 becomes 0.
    RightLogical,
}

impl Cpu {
    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a();
        let carry_in = u8::from(use_carry && self.get_flag(Flags::CARRY));

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;

        self.regs.set_a(result);

        self.clear_flags();
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::HALF_CARRY, half > 0x0F);
        self.set_flag(Flags::CARRY, full > 0xFF);
    }

    /// Core 8-bit SUB/SBC operation on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.alu_sub_flags(value, use_carry);
        self.regs.set_a(result);
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.alu_sub_flags(value, false);
    }

    fn alu_sub_flags(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a();
        let carry_in = i16::from(use_carry && self.get_flag(Flags::CARRY));

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in;
        let full = a as i16 - value as i16 - carry_in;
        let result = full as u8;

        self.clear_flags();
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::SUBTRACT, true);
        self.set_flag(Flags::HALF_CARRY, half < 0);
        self.set_flag(Flags::CARRY, full < 0);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a() & value;
        self.regs.set_a(result);

        self.clear_flags();
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::HALF_CARRY, true);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a() | value;
        self.regs.set_a(result);

        self.clear_flags();
        self.set_flag(Flags::ZERO, result == 0);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a() ^ value;
        self.regs.set_a(result);

        self.clear_flags();
        self.set_flag(Flags::ZERO, result == 0);
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H, N and A to pick the correction value, then updates
    /// A, Z, H and C. N is left unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a();
        let mut adjust: u8 = if self.get_flag(Flags::CARRY) { 0x60 } else { 0x00 };
        if self.get_flag(Flags::HALF_CARRY) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flags::SUBTRACT) {
            // After an addition.
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flags::CARRY, adjust >= 0x60);
        self.set_flag(Flags::HALF_CARRY, false);
        self.set_flag(Flags::ZERO, a == 0);
        self.regs.set_a(a);
    }

    /// 8-bit increment used by INC r and INC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::SUBTRACT, false);
        self.set_flag(Flags::HALF_CARRY, (value & 0x0F) == 0x0F);
        result
    }

    /// 8-bit decrement used by DEC r and DEC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::SUBTRACT, true);
        self.set_flag(Flags::HALF_CARRY, (value & 0x0F) == 0);
        result
    }

    /// `ADD HL,rr`: Z is unaffected, N is cleared, H and C come from bits
    /// 11 and 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);

        self.set_flag(Flags::SUBTRACT, false);
        self.set_flag(Flags::HALF_CARRY, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flags::CARRY, hl as u32 + value as u32 > 0xFFFF);

        self.regs.set_hl(result);
    }

    /// Signed 8-bit offset added to a 16-bit base (ADD SP,r8 and
    /// LD HL,SP+r8).
    ///
    /// Z and N are cleared; H and C are computed from the low byte as an
    /// unsigned addition.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.set_flag(Flags::SUBTRACT, false);
        self.set_flag(Flags::ZERO, false);
        self.set_flag(Flags::HALF_CARRY, (base & 0x000F) + (offset & 0x000F) > 0x000F);
        self.set_flag(Flags::CARRY, (base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        base.wrapping_add(offset)
    }

    /// RLC/RRC (`through_carry == false`) and RL/RR (`through_carry == true`).
    ///
    /// The bit shifted out becomes C; Z reflects the result; N and H clear.
    pub(super) fn alu_rotate(&mut self, value: u8, direction: Direction, through_carry: bool) -> u8 {
        let carry_in = u8::from(self.get_flag(Flags::CARRY));
        let (result, carry_out) = match direction {
            Direction::Left => {
                let fill = if through_carry { carry_in } else { value >> 7 };
                ((value << 1) | fill, value & 0x80 != 0)
            }
            Direction::Right => {
                let fill = if through_carry { carry_in << 7 } else { value << 7 };
                ((value >> 1) | fill, value & 0x01 != 0)
            }
        };
        self.set_shift_flags(result, carry_out);
        result
    }

    pub(super) fn alu_shift(&mut self, value: u8, shift: Shift) -> u8 {
        let (result, carry_out) = match shift {
            Shift::LeftArithmetic => (value << 1, value & 0x80 != 0),
            Shift::RightArithmetic => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            Shift::RightLogical => (value >> 1, value & 0x01 != 0),
        };
        self.set_shift_flags(result, carry_out);
        result
    }

    /// Exchange the nibbles of `value`; every flag but Z is cleared.
    pub(super) fn alu_swap(&mut self, value: u8) -> u8 {
        let result = value.rotate_left(4);
        self.set_shift_flags(result, false);
        result
    }

    /// BIT b: Z is set when the tested bit is 0, H is set, N clears and C
    /// is preserved.
    pub(super) fn alu_bit(&mut self, value: u8, bit: u8) {
        let bit_set = value & (1 << bit) != 0;
        self.set_flag(Flags::ZERO, !bit_set);
        self.set_flag(Flags::SUBTRACT, false);
        self.set_flag(Flags::HALF_CARRY, true);
    }

    #[inline]
    fn set_shift_flags(&mut self, result: u8, carry: bool) {
        self.clear_flags();
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::CARRY, carry);
    }
}
