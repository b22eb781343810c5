use std::fmt;

use lazy_static::lazy_static;

use super::mnemonics::{BASE_MNEMONICS, CB_MNEMONICS};
use super::{Bus, Cpu, IE_ADDR, IF_ADDR};
use crate::error::{Error, Result};

/// How a handler finished. Selects which of the table's cycle costs is
/// charged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Flow {
    Done,
    /// A conditional branch fell through.
    NotTaken,
    /// The operand bytes do not form a valid instruction (STOP followed by
    /// a non-zero byte). The handler must not have touched any state.
    Invalid,
}

/// Opcode and immediate operand, fetched before the handler runs.
///
/// For 0xCB-prefixed instructions `opcode` is the byte after the prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Decoded {
    pub(super) opcode: u8,
    imm: u16,
}

impl Decoded {
    #[inline]
    pub(super) fn imm8(self) -> u8 {
        self.imm as u8
    }

    #[inline]
    pub(super) fn imm16(self) -> u16 {
        self.imm
    }
}

pub(super) type Handler = fn(&mut Cpu, &mut dyn Bus, Decoded) -> Flow;

#[derive(Clone, Copy)]
enum Exec {
    Handler(Handler),
    /// Route through the 0xCB table using the next byte.
    PrefixCb,
    /// Opcode hole: no instruction exists.
    Missing,
}

/// Static description of one opcode.
#[derive(Clone, Copy)]
pub struct OpcodeInfo {
    pub mnemonic: &'static str,
    /// Total instruction length in bytes, including the 0xCB prefix for
    /// extended opcodes.
    pub length: u8,
    /// T-cycles charged when the instruction completes (or a conditional
    /// branch is taken).
    pub cycles: u32,
    /// T-cycles charged when a conditional branch is not taken. Equal to
    /// `cycles` for everything else.
    pub cycles_not_taken: u32,
    exec: Exec,
}

impl OpcodeInfo {
    /// False only for the opcode holes.
    pub fn is_implemented(&self) -> bool {
        !matches!(self.exec, Exec::Missing)
    }

    pub fn is_prefix(&self) -> bool {
        matches!(self.exec, Exec::PrefixCb)
    }

    pub fn is_conditional(&self) -> bool {
        self.cycles != self.cycles_not_taken
    }
}

impl fmt::Debug for OpcodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exec = match self.exec {
            Exec::Handler(_) => "handler",
            Exec::PrefixCb => "prefix",
            Exec::Missing => "missing",
        };
        f.debug_struct("OpcodeInfo")
            .field("mnemonic", &self.mnemonic)
            .field("length", &self.length)
            .field("cycles", &self.cycles)
            .field("cycles_not_taken", &self.cycles_not_taken)
            .field("exec", &exec)
            .finish()
    }
}

lazy_static! {
    static ref BASE_TABLE: [OpcodeInfo; 256] = std::array::from_fn(|i| base_entry(i as u8));
    static ref CB_TABLE: [OpcodeInfo; 256] = std::array::from_fn(|i| cb_entry(i as u8));
}

/// Metadata for an unprefixed opcode.
pub fn opcode_info(opcode: u8) -> OpcodeInfo {
    BASE_TABLE[opcode as usize]
}

/// Metadata for the opcode following a 0xCB prefix.
pub fn cb_opcode_info(opcode: u8) -> OpcodeInfo {
    CB_TABLE[opcode as usize]
}

fn op(mnemonic: &'static str, handler: Handler, length: u8, cycles: u32) -> OpcodeInfo {
    branch(mnemonic, handler, length, cycles, cycles)
}

fn branch(
    mnemonic: &'static str,
    handler: Handler,
    length: u8,
    taken: u32,
    not_taken: u32,
) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        length,
        cycles: taken,
        cycles_not_taken: not_taken,
        exec: Exec::Handler(handler),
    }
}

fn base_entry(opcode: u8) -> OpcodeInfo {
    let m = BASE_MNEMONICS[opcode as usize];
    // Register fields: bits 5..3 (destination) and 2..0 (source), 6 = (HL).
    let dst = (opcode >> 3) & 0x07;
    let src = opcode & 0x07;

    match opcode {
        0x00 => op(m, Cpu::exec_nop, 1, 4),
        0x01 | 0x11 | 0x21 | 0x31 => op(m, Cpu::exec_ld_rr_d16, 3, 12),
        0x02 | 0x12 | 0x22 | 0x32 => op(m, Cpu::exec_ld_indirect_a, 1, 8),
        0x0A | 0x1A | 0x2A | 0x3A => op(m, Cpu::exec_ld_a_indirect, 1, 8),
        0x03 | 0x13 | 0x23 | 0x33 => op(m, Cpu::exec_inc16_rr, 1, 8),
        0x0B | 0x1B | 0x2B | 0x3B => op(m, Cpu::exec_dec16_rr, 1, 8),
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
            op(m, Cpu::exec_inc8_reg, 1, if dst == 6 { 12 } else { 4 })
        }
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
            op(m, Cpu::exec_dec8_reg, 1, if dst == 6 { 12 } else { 4 })
        }
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
            op(m, Cpu::exec_ld_r_d8, 2, if dst == 6 { 12 } else { 8 })
        }
        0x07 | 0x0F | 0x17 | 0x1F => op(m, Cpu::exec_rotate_a, 1, 4),
        0x08 => op(m, Cpu::exec_ld_a16_sp, 3, 20),
        0x09 | 0x19 | 0x29 | 0x39 => op(m, Cpu::exec_add_hl_rr, 1, 8),
        0x10 => op(m, Cpu::exec_stop, 2, 4),
        0x18 => op(m, Cpu::exec_jr, 2, 12),
        0x20 | 0x28 | 0x30 | 0x38 => branch(m, Cpu::exec_jr_cc, 2, 12, 8),
        0x27 => op(m, Cpu::exec_daa, 1, 4),
        0x2F => op(m, Cpu::exec_cpl, 1, 4),
        0x37 => op(m, Cpu::exec_scf, 1, 4),
        0x3F => op(m, Cpu::exec_ccf, 1, 4),

        0x76 => op(m, Cpu::exec_halt, 1, 4),
        0x40..=0x7F => op(m, Cpu::exec_ld_r_r, 1, if dst == 6 || src == 6 { 8 } else { 4 }),
        0x80..=0xBF => op(m, Cpu::exec_alu_reg_group, 1, if src == 6 { 8 } else { 4 }),

        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => op(m, Cpu::exec_alu_imm, 2, 8),
        0xC0 | 0xC8 | 0xD0 | 0xD8 => branch(m, Cpu::exec_ret_cc, 1, 20, 8),
        0xC2 | 0xCA | 0xD2 | 0xDA => branch(m, Cpu::exec_jp_cc, 3, 16, 12),
        0xC4 | 0xCC | 0xD4 | 0xDC => branch(m, Cpu::exec_call_cc, 3, 24, 12),
        0xC1 | 0xD1 | 0xE1 | 0xF1 => op(m, Cpu::exec_pop_rr, 1, 12),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => op(m, Cpu::exec_push_rr, 1, 16),
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => op(m, Cpu::exec_rst, 1, 16),
        0xC3 => op(m, Cpu::exec_jp_a16, 3, 16),
        0xC9 => op(m, Cpu::exec_ret, 1, 16),
        0xCD => op(m, Cpu::exec_call_a16, 3, 24),
        0xD9 => op(m, Cpu::exec_reti, 1, 16),
        0xE9 => op(m, Cpu::exec_jp_hl, 1, 4),

        0xE0 | 0xF0 => op(m, Cpu::exec_ldh_a8, 2, 12),
        0xE2 | 0xF2 => op(m, Cpu::exec_ldh_c, 1, 8),
        0xEA | 0xFA => op(m, Cpu::exec_ld_a16_a, 3, 16),
        0xE8 => op(m, Cpu::exec_add_sp_r8, 2, 16),
        0xF8 => op(m, Cpu::exec_ld_hl_sp_r8, 2, 12),
        0xF9 => op(m, Cpu::exec_ld_sp_hl, 1, 8),
        0xF3 => op(m, Cpu::exec_di, 1, 4),
        0xFB => op(m, Cpu::exec_ei, 1, 4),

        // The prefix entry only routes; length and cost come from the CB
        // table.
        0xCB => OpcodeInfo {
            mnemonic: m,
            length: 2,
            cycles: 0,
            cycles_not_taken: 0,
            exec: Exec::PrefixCb,
        },

        // Pan Docs "opcode holes": D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD.
        _ => OpcodeInfo {
            mnemonic: m,
            length: 1,
            cycles: 0,
            cycles_not_taken: 0,
            exec: Exec::Missing,
        },
    }
}

fn cb_entry(opcode: u8) -> OpcodeInfo {
    let m = CB_MNEMONICS[opcode as usize];
    let indirect = opcode & 0x07 == 6;

    let (handler, cycles) = match opcode >> 6 {
        0 => (Cpu::exec_cb_shift as Handler, if indirect { 16 } else { 8 }),
        // BIT only reads (HL), so it skips the write-back cycle.
        1 => (Cpu::exec_cb_bit as Handler, if indirect { 12 } else { 8 }),
        2 => (Cpu::exec_cb_res as Handler, if indirect { 16 } else { 8 }),
        _ => (Cpu::exec_cb_set as Handler, if indirect { 16 } else { 8 }),
    };
    op(m, handler, 2, cycles)
}

impl Cpu {
    /// Execute a single instruction and return the number of T-cycles taken.
    ///
    /// PC is moved past the instruction before its handler runs; jumps,
    /// calls, returns and RST then overwrite it. Opcode holes and invalid
    /// encodings return [`Error::Unimplemented`] and leave the CPU exactly
    /// as it was, with PC still on the offending opcode.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        self.step_instruction(bus)
    }

    /// Point PC at `addr` and, if `execute` is set, run exactly one
    /// instruction there. Executing clears HALT so the instruction actually
    /// runs; a plain reposition leaves it alone.
    ///
    /// Returns the cycles spent, or 0 when nothing was executed.
    pub fn force_pc<B: Bus>(&mut self, bus: &mut B, addr: u16, execute: bool) -> Result<u32> {
        self.regs.pc = addr;
        if !execute {
            return Ok(0);
        }
        self.halted = false;
        self.step(bus)
    }

    /// Decode (without executing) the instruction at `addr`.
    pub fn decode_at<B: Bus>(&self, bus: &mut B, addr: u16) -> OpcodeInfo {
        let info = opcode_info(bus.read8(addr));
        if info.is_prefix() {
            cb_opcode_info(bus.read8(addr.wrapping_add(1)))
        } else {
            info
        }
    }

    /// True when IE and IF share a requested interrupt line.
    pub fn interrupt_pending<B: Bus + ?Sized>(&self, bus: &mut B) -> bool {
        bus.read8(IE_ADDR) & bus.read8(IF_ADDR) & 0x1F != 0
    }

    fn step_instruction(&mut self, bus: &mut dyn Bus) -> Result<u32> {
        if self.halted && !self.interrupt_pending(bus) {
            // HALT idles until an enabled interrupt is requested. There is
            // no vector dispatch; execution just resumes after the HALT.
            return Ok(4);
        }

        let pc = self.regs.pc;
        let opcode = bus.read8(pc);
        let mut info = opcode_info(opcode);
        let mut decoded_opcode = opcode;
        let mut opcode_len = 1;
        if info.is_prefix() {
            decoded_opcode = bus.read8(pc.wrapping_add(1));
            info = cb_opcode_info(decoded_opcode);
            opcode_len = 2;
        }

        let Exec::Handler(handler) = info.exec else {
            return Err(self.unimplemented(opcode, pc));
        };

        let imm = match info.length - opcode_len {
            0 => 0,
            1 => bus.read8(pc.wrapping_add(1)) as u16,
            _ => bus.read16(pc.wrapping_add(1)),
        };

        let (was_halted, was_stopped) = (self.halted, self.stopped);
        self.halted = false;
        self.stopped = false;
        self.regs.pc = pc.wrapping_add(info.length as u16);

        let decoded = Decoded {
            opcode: decoded_opcode,
            imm,
        };
        let cycles = match handler(self, bus, decoded) {
            Flow::Done => info.cycles,
            Flow::NotTaken => info.cycles_not_taken,
            Flow::Invalid => {
                self.regs.pc = pc;
                self.halted = was_halted;
                self.stopped = was_stopped;
                return Err(self.unimplemented(opcode, pc));
            }
        };

        self.apply_ime_delay();
        Ok(cycles)
    }

    fn unimplemented(&self, opcode: u8, pc: u16) -> Error {
        log::error!(
            "GB CPU: unimplemented opcode 0x{opcode:02X} at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
            opcode = opcode,
            pc = pc,
            sp = self.regs.sp,
            af = self.regs.af(),
            bc = self.regs.bc(),
            de = self.regs.de(),
            hl = self.regs.hl(),
        );
        Error::Unimplemented { opcode, pc }
    }
}
