use super::Memory;

/// IO register values visible to software right after the boot ROM
/// (Pan Docs, "Power Up Sequence"). Registers not listed start at 0.
pub(super) const POWER_ON_IO: &[(u16, u8)] = &[
    // Timer.
    (0xFF05, 0x00), // TIMA
    (0xFF06, 0x00), // TMA
    (0xFF07, 0x00), // TAC
    // Sound.
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF17, 0x00),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF21, 0x00),
    (0xFF22, 0x00),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
    // PPU.
    (0xFF40, 0x91), // LCDC
    (0xFF42, 0x00), // SCY
    (0xFF43, 0x00), // SCX
    (0xFF45, 0x00), // LYC
    (0xFF47, 0xFC), // BGP
    (0xFF48, 0xFF), // OBP0
    (0xFF49, 0xFF), // OBP1
    (0xFF4A, 0x00), // WY
    (0xFF4B, 0x00), // WX
    // Interrupt enable.
    (0xFFFF, 0x00),
];

impl Memory {
    pub(super) fn apply_power_on_state(&mut self) {
        for &(addr, value) in POWER_ON_IO {
            self.general[addr as usize] = value;
        }
    }
}
