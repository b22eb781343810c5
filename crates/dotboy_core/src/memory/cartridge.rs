use crate::error::{Error, Result};

const ROM_BANK_SIZE: usize = 0x4000;
const RAM_BANK_SIZE: usize = 0x2000;

/// Largest image any supported controller can address (MBC5, 512 banks).
pub(super) const MAX_ROM_SIZE: usize = 512 * ROM_BANK_SIZE;

const HEADER_END: usize = 0x150;
const CARTRIDGE_TYPE_ADDR: usize = 0x147;
const RAM_SIZE_ADDR: usize = 0x149;

/// Memory bank controller named by cartridge header byte 0x147.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BankController {
    /// 32 KiB cartridges with no banking hardware.
    RomOnly,
    Mbc1,
    Mbc2,
    /// MBC3; the real-time clock registers are not modelled.
    Mbc3,
    Mbc5,
}

impl BankController {
    pub fn from_header_code(code: u8) -> Result<Self> {
        match code {
            0x00 | 0x08 | 0x09 => Ok(Self::RomOnly),
            0x01..=0x03 => Ok(Self::Mbc1),
            0x05 | 0x06 => Ok(Self::Mbc2),
            0x0F..=0x13 => Ok(Self::Mbc3),
            0x19..=0x1E => Ok(Self::Mbc5),
            _ => Err(Error::UnsupportedCartridge { code }),
        }
    }
}

/// Cartridge ROM, external RAM and the registers that select which banks
/// appear at 0x4000–0x7FFF and 0xA000–0xBFFF.
///
/// RAM enable and MBC1 banking mode are not modelled: external RAM is
/// always accessible and MBC1's upper bits drive both ROM and RAM banks.
pub(super) struct Cartridge {
    controller: BankController,
    rom: Vec<u8>,
    ram: Vec<u8>,
    num_rom_banks: usize,
    num_ram_banks: usize,
    // MBC1: 5 bits, MBC2: 4 bits, MBC3: 7 bits, MBC5: low 8 bits.
    rom_bank_low: u8,
    // MBC1: 2 bits (also the RAM bank), MBC5: bit 8 of the ROM bank.
    rom_bank_high: u8,
    ram_bank_select: u8,
    rom_bank: usize,
    ram_bank: usize,
}

impl Cartridge {
    /// No cartridge inserted: every ROM read yields 0xFF.
    pub(super) fn empty() -> Self {
        Self::with_layout(BankController::RomOnly, Vec::new(), 1)
    }

    pub(super) fn from_rom(rom: &[u8]) -> Result<Self> {
        if rom.is_empty() {
            return Err(Error::EmptyRom);
        }
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge { len: rom.len() });
        }

        // Headerless images (test programs) map flat at 0x0000.
        let (controller, num_ram_banks) = if rom.len() < HEADER_END {
            (BankController::RomOnly, 1)
        } else {
            let controller = BankController::from_header_code(rom[CARTRIDGE_TYPE_ADDR])?;
            (controller, ram_banks_for(controller, rom[RAM_SIZE_ADDR]))
        };

        let cartridge = Self::with_layout(controller, rom.to_vec(), num_ram_banks);
        log::debug!(
            "cartridge: {:?}, {} bytes, {} ROM banks, {} RAM banks",
            controller,
            rom.len(),
            cartridge.num_rom_banks,
            cartridge.num_ram_banks
        );
        Ok(cartridge)
    }

    fn with_layout(controller: BankController, rom: Vec<u8>, num_ram_banks: usize) -> Self {
        let num_rom_banks = rom.len().div_ceil(ROM_BANK_SIZE).max(1);
        // Always back at least one bank so 0xA000–0xBFFF behaves as RAM.
        let num_ram_banks = num_ram_banks.max(1);
        Self {
            controller,
            rom,
            ram: vec![0xFF; num_ram_banks * RAM_BANK_SIZE],
            num_rom_banks,
            num_ram_banks,
            rom_bank_low: 1,
            rom_bank_high: 0,
            ram_bank_select: 0,
            rom_bank: 1,
            ram_bank: 0,
        }
    }

    pub(super) fn controller(&self) -> BankController {
        self.controller
    }

    pub(super) fn rom_bank(&self) -> usize {
        self.rom_bank
    }

    pub(super) fn ram_bank(&self) -> usize {
        self.ram_bank
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let index = if addr < 0x4000 {
            addr as usize
        } else {
            self.rom_bank * ROM_BANK_SIZE + (addr as usize - 0x4000)
        };
        // Reads past the end of the image float high.
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        self.ram.get(self.ram_index(addr)).copied().unwrap_or(0xFF)
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        let index = self.ram_index(addr);
        if let Some(cell) = self.ram.get_mut(index) {
            *cell = value;
        }
    }

    fn ram_index(&self, addr: u16) -> usize {
        self.ram_bank * RAM_BANK_SIZE + (addr as usize - 0xA000)
    }

    /// Writes into the ROM window program the bank controller.
    pub(super) fn control_write(&mut self, addr: u16, value: u8) {
        match self.controller {
            BankController::RomOnly => {
                log::trace!("ignored ROM write 0x{value:02X} at 0x{addr:04X}");
                return;
            }
            BankController::Mbc1 => match addr {
                0x2000..=0x3FFF => self.rom_bank_low = nonzero_bank(value & 0x1F),
                0x4000..=0x5FFF => self.rom_bank_high = value & 0x03,
                _ => return,
            },
            BankController::Mbc2 => match addr {
                // Bit 8 of the address picks the ROM bank register.
                0x0000..=0x3FFF if addr & 0x0100 != 0 => {
                    self.rom_bank_low = nonzero_bank(value & 0x0F)
                }
                _ => return,
            },
            BankController::Mbc3 => match addr {
                0x2000..=0x3FFF => self.rom_bank_low = nonzero_bank(value & 0x7F),
                0x4000..=0x5FFF if value <= 0x03 => self.ram_bank_select = value,
                0x4000..=0x5FFF => {
                    log::warn!("RTC register 0x{value:02X} selected; not modelled");
                    return;
                }
                _ => return,
            },
            BankController::Mbc5 => match addr {
                // MBC5 can map bank 0 into the switchable window.
                0x2000..=0x2FFF => self.rom_bank_low = value,
                0x3000..=0x3FFF => self.rom_bank_high = value & 0x01,
                0x4000..=0x5FFF => self.ram_bank_select = value & 0x0F,
                _ => return,
            },
        }
        self.select_banks();
    }

    fn select_banks(&mut self) {
        let low = self.rom_bank_low as usize;
        let high = self.rom_bank_high as usize;
        let (rom_bank, ram_bank) = match self.controller {
            BankController::RomOnly => (1, 0),
            BankController::Mbc1 => (low | (high << 5), high),
            BankController::Mbc2 => (low, 0),
            BankController::Mbc3 => (low, self.ram_bank_select as usize),
            BankController::Mbc5 => (low | (high << 8), self.ram_bank_select as usize),
        };
        let rom_bank = rom_bank % self.num_rom_banks;
        let ram_bank = ram_bank % self.num_ram_banks;

        if rom_bank != self.rom_bank {
            log::debug!("ROM bank {} -> {}", self.rom_bank, rom_bank);
            self.rom_bank = rom_bank;
        }
        if ram_bank != self.ram_bank {
            log::debug!("RAM bank {} -> {}", self.ram_bank, ram_bank);
            self.ram_bank = ram_bank;
        }
    }
}

fn nonzero_bank(bank: u8) -> u8 {
    if bank == 0 {
        1
    } else {
        bank
    }
}

/// External RAM banks declared by header byte 0x149. MBC2 carries its own
/// 512 half-byte cells, rounded up to one bank.
fn ram_banks_for(controller: BankController, code: u8) -> usize {
    if controller == BankController::Mbc2 {
        return 1;
    }
    match code {
        0x00 => 0,
        0x01 => 1, // 2 KiB, rounded up to one 8 KiB bank
        0x02 => 1,
        0x03 => 4,
        0x04 => 16,
        0x05 => 8,
        _ => 0,
    }
}
