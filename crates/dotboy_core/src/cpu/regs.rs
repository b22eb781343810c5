use bitflags::bitflags;

/// One of the AF/BC/DE/HL register pairs.
///
/// The pair is stored as a single word; the 8-bit halves are views into it,
/// so `word == high << 8 | low` holds at all times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegisterPair(u16);

impl RegisterPair {
    pub const fn new(word: u16) -> Self {
        Self(word)
    }

    #[inline]
    pub const fn word(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn low(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn set_word(&mut self, value: u16) {
        self.0 = value;
    }

    #[inline]
    pub fn set_high(&mut self, value: u8) {
        self.0 = u16::from_be_bytes([value, self.low()]);
    }

    #[inline]
    pub fn set_low(&mut self, value: u8) {
        self.0 = u16::from_be_bytes([self.high(), value]);
    }
}

impl From<u16> for RegisterPair {
    fn from(word: u16) -> Self {
        Self(word)
    }
}

impl From<RegisterPair> for u16 {
    fn from(pair: RegisterPair) -> Self {
        pair.0
    }
}

bitflags! {
    /// Condition codes, laid out as they appear in the F register.
    ///
    /// - bit 7: Z (zero)
    /// - bit 6: N (subtract)
    /// - bit 5: H (half carry)
    /// - bit 4: C (carry)
    /// - bits 0–3 are always zero.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const ZERO = 0b1000_0000;
        const SUBTRACT = 0b0100_0000;
        const HALF_CARRY = 0b0010_0000;
        const CARRY = 0b0001_0000;
    }
}

/// Register file for the Game Boy CPU (LR35902).
///
/// Flags are not stored separately: they are read from and written to the
/// low byte of AF, so a load into F is a flag update and vice versa.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    af: RegisterPair,
    bc: RegisterPair,
    de: RegisterPair,
    hl: RegisterPair,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn a(&self) -> u8 {
        self.af.high()
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.af.set_high(value);
    }

    #[inline]
    pub fn f(&self) -> u8 {
        self.af.low()
    }

    #[inline]
    pub fn set_f(&mut self, value: u8) {
        // Lower 4 bits of F are always zero.
        self.af.set_low(value & 0xF0);
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.bc.high()
    }

    #[inline]
    pub fn set_b(&mut self, value: u8) {
        self.bc.set_high(value);
    }

    #[inline]
    pub fn c(&self) -> u8 {
        self.bc.low()
    }

    #[inline]
    pub fn set_c(&mut self, value: u8) {
        self.bc.set_low(value);
    }

    #[inline]
    pub fn d(&self) -> u8 {
        self.de.high()
    }

    #[inline]
    pub fn set_d(&mut self, value: u8) {
        self.de.set_high(value);
    }

    #[inline]
    pub fn e(&self) -> u8 {
        self.de.low()
    }

    #[inline]
    pub fn set_e(&mut self, value: u8) {
        self.de.set_low(value);
    }

    #[inline]
    pub fn h(&self) -> u8 {
        self.hl.high()
    }

    #[inline]
    pub fn set_h(&mut self, value: u8) {
        self.hl.set_high(value);
    }

    #[inline]
    pub fn l(&self) -> u8 {
        self.hl.low()
    }

    #[inline]
    pub fn set_l(&mut self, value: u8) {
        self.hl.set_low(value);
    }

    #[inline]
    pub fn af(&self) -> u16 {
        self.af.word()
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        self.af.set_word(value & 0xFFF0);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.bc.word()
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        self.bc.set_word(value);
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.de.word()
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        self.de.set_word(value);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.hl.word()
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.hl.set_word(value);
    }

    /// The four register pairs in AF, BC, DE, HL order.
    pub fn pairs(&self) -> [RegisterPair; 4] {
        [self.af, self.bc, self.de, self.hl]
    }

    /// Current condition codes, decoded from the low byte of AF.
    #[inline]
    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.af.low())
    }

    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.af.set_low(flags.bits());
    }

    #[inline]
    pub fn flag(&self, flag: Flags) -> bool {
        self.flags().contains(flag)
    }

    /// Set or clear `flag` in place, leaving every other bit of F alone.
    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.flags();
        flags.set(flag, value);
        self.set_flags(flags);
    }
}
