//! Instruction-level Game Boy (LR35902) emulator core.
//!
//! [`Cpu`] decodes and executes one instruction per [`Cpu::step`] call
//! against any [`Bus`]; [`Memory`] is the banked, mirrored 64 KiB address
//! space a cartridge runs in, and [`Machine`] pairs the two for batch runs.

pub mod cpu;
mod error;
pub mod machine;
pub mod memory;

pub use cpu::{BootState, Bus, Cpu, CpuSnapshot, Flags, OpcodeInfo, RegisterPair, Registers};
pub use error::{Error, Result};
pub use machine::{Machine, RunSummary, StopReason};
pub use memory::{BankController, Memory};
