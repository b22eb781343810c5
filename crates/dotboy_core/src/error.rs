use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core.
///
/// Memory accesses never fail; out-of-range and protected accesses are
/// logged and absorbed instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The ROM image has no bytes at all.
    #[error("ROM image is empty")]
    EmptyRom,
    /// The ROM image is larger than any cartridge can map (512 banks).
    #[error("ROM image is {len} bytes, larger than the 8 MiB cartridge limit")]
    RomTooLarge { len: usize },
    /// Header byte 0x147 names a controller this core does not model.
    #[error("unsupported cartridge type {code:#04x}")]
    UnsupportedCartridge { code: u8 },
    /// `step` met an opcode with no instruction behind it. CPU state is
    /// unchanged; PC still addresses the opcode.
    #[error("unimplemented opcode {opcode:#04x} at {pc:#06x}")]
    Unimplemented { opcode: u8, pc: u16 },
}
