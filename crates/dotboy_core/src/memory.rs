mod cartridge;
mod init;
mod serial;

pub use cartridge::BankController;

use cartridge::Cartridge;
use serial::Serial;

use crate::cpu::Bus;
use crate::error::Result;

/// Total addressable memory for the Game Boy (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

const SB_ADDR: u16 = 0xFF01;
const SC_ADDR: u16 = 0xFF02;

/// The CPU-visible address space.
///
/// | Range         | Read                  | Write                          |
/// |---------------|-----------------------|--------------------------------|
/// | 0x0000–0x3FFF | cartridge bank 0      | bank controller registers      |
/// | 0x4000–0x7FFF | selected ROM bank     | bank controller registers      |
/// | 0xA000–0xBFFF | selected RAM bank     | same cell                      |
/// | 0xC000–0xDFFF | work RAM              | also written at `addr + 0x2000`|
/// | 0xE000–0xFDFF | echo RAM              | also written at `addr - 0x2000`|
/// | 0xFEA0–0xFEFF | general memory        | dropped                        |
/// | everything else | general memory      | stored directly                |
pub struct Memory {
    general: Box<[u8]>,
    cartridge: Cartridge,
    serial: Serial,
    protected_write_logged: bool,
    out_of_range_logged: bool,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Memory with the power-on IO values applied and no cartridge.
    pub fn new() -> Self {
        let mut memory = Self {
            general: vec![0; MEMORY_SIZE].into_boxed_slice(),
            cartridge: Cartridge::empty(),
            serial: Serial::default(),
            protected_write_logged: false,
            out_of_range_logged: false,
        };
        memory.apply_power_on_state();
        memory
    }

    /// Insert a cartridge. The image is classified from its header; images
    /// shorter than the header are mapped as plain ROM.
    ///
    /// Everything else returns to the power-on state: work RAM, IO
    /// registers and the serial capture. A rejected image leaves memory
    /// untouched.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        let cartridge = Cartridge::from_rom(rom)?;
        *self = Self {
            cartridge,
            ..Self::new()
        };
        Ok(())
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_read(addr),
            0xA000..=0xBFFF => self.cartridge.ram_read(addr),
            _ => self.general[addr as usize],
        }
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        match addr {
            // ROM is never modified; the cartridge interprets these writes
            // as bank controller commands.
            0x0000..=0x7FFF => self.cartridge.control_write(addr, value),
            0xA000..=0xBFFF => self.cartridge.ram_write(addr, value),
            0xC000..=0xDFFF => {
                self.general[addr as usize] = value;
                self.general[addr as usize + 0x2000] = value;
            }
            0xE000..=0xFDFF => {
                self.general[addr as usize] = value;
                self.general[addr as usize - 0x2000] = value;
            }
            0xFEA0..=0xFEFF => self.log_protected_write(addr, value),
            SC_ADDR => {
                let sb = self.general[SB_ADDR as usize];
                self.general[addr as usize] = self.serial.write_sc(sb, value);
            }
            _ => self.general[addr as usize] = value,
        }
    }

    /// Little-endian word at `addr` / `addr + 1`, wrapping at 0xFFFF.
    pub fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read_byte(addr);
        let hi = self.read_byte(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    pub fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write_byte(addr, lo);
        self.write_byte(addr.wrapping_add(1), hi);
    }

    /// Read from an address that may lie outside the 16-bit space.
    /// Out-of-range reads return 0.
    pub fn read_checked(&mut self, addr: usize) -> u8 {
        match u16::try_from(addr) {
            Ok(addr) => self.read_byte(addr),
            Err(_) => {
                self.log_out_of_range("read", addr);
                0
            }
        }
    }

    /// Write to an address that may lie outside the 16-bit space.
    /// Out-of-range writes are dropped.
    pub fn write_checked(&mut self, addr: usize, value: u8) {
        match u16::try_from(addr) {
            Ok(addr) => self.write_byte(addr, value),
            Err(_) => self.log_out_of_range("write", addr),
        }
    }

    /// Bytes sent over the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        self.serial.output()
    }

    pub fn take_serial_output(&mut self) -> Vec<u8> {
        self.serial.take_output()
    }

    pub fn bank_controller(&self) -> BankController {
        self.cartridge.controller()
    }

    /// ROM bank currently mapped at 0x4000–0x7FFF.
    pub fn rom_bank(&self) -> usize {
        self.cartridge.rom_bank()
    }

    /// RAM bank currently mapped at 0xA000–0xBFFF.
    pub fn ram_bank(&self) -> usize {
        self.cartridge.ram_bank()
    }

    fn log_protected_write(&mut self, addr: u16, value: u8) {
        if self.protected_write_logged {
            log::trace!("ignored write of 0x{value:02X} to unusable 0x{addr:04X}");
        } else {
            self.protected_write_logged = true;
            log::warn!(
                "ignored write of 0x{value:02X} to unusable 0x{addr:04X} (further writes logged at trace)"
            );
        }
    }

    fn log_out_of_range(&mut self, access: &str, addr: usize) {
        if self.out_of_range_logged {
            log::trace!("out-of-range {access} at 0x{addr:X}");
        } else {
            self.out_of_range_logged = true;
            log::warn!("out-of-range {access} at 0x{addr:X} (further accesses logged at trace)");
        }
    }
}

impl Bus for Memory {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read_byte(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write_byte(addr, value);
    }
}
