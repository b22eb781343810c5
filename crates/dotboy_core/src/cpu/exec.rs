//! Instruction handlers for the unprefixed opcode table.
//!
//! Each handler receives the already-fetched opcode and immediate operand;
//! PC points at the next instruction when it runs. Cycle costs live in the
//! dispatch tables, so handlers only report whether a branch was taken.

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
