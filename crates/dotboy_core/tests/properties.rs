//! Property-based tests for register, memory and execution invariants.

use dotboy_core::cpu::{cb_opcode_info, opcode_info};
use dotboy_core::{Bus, Cpu, Error, Flags, Memory, RegisterPair, Registers};
use proptest::prelude::*;

/// Flat 64 KiB bus with no mapping rules.
struct FlatBus {
    memory: Vec<u8>,
}

impl FlatBus {
    fn new() -> Self {
        Self {
            memory: vec![0; 0x10000],
        }
    }
}

impl Bus for FlatBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

fn all_flags() -> impl Strategy<Value = Flags> {
    prop::sample::select(vec![
        Flags::ZERO,
        Flags::SUBTRACT,
        Flags::HALF_CARRY,
        Flags::CARRY,
    ])
}

fn pair_value(regs: &Registers, pair: usize) -> u16 {
    match pair {
        0 => regs.bc(),
        1 => regs.de(),
        _ => regs.hl(),
    }
}

fn set_pair(regs: &mut Registers, pair: usize, value: u16) {
    match pair {
        0 => regs.set_bc(value),
        1 => regs.set_de(value),
        _ => regs.set_hl(value),
    }
}

/// Base opcodes whose only effect on PC is to step over themselves.
fn non_branching_opcodes() -> Vec<u8> {
    (0..=255u8)
        .filter(|&op| {
            let info = opcode_info(op);
            info.is_implemented()
                && !info.is_prefix()
                && !["JP", "JR", "CALL", "RET", "RST", "STOP"]
                    .iter()
                    .any(|prefix| info.mnemonic.starts_with(prefix))
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_register_pair_halves_compose_the_word(word in any::<u16>()) {
        let mut pair = RegisterPair::default();
        pair.set_word(word);
        prop_assert_eq!(pair.high(), (word >> 8) as u8);
        prop_assert_eq!(pair.low(), (word & 0xFF) as u8);
        prop_assert_eq!(u16::from(pair), word);
    }

    #[test]
    fn prop_register_pair_half_writes_are_independent(
        word in any::<u16>(),
        high in any::<u8>(),
        low in any::<u8>(),
    ) {
        let mut pair = RegisterPair::new(word);
        pair.set_high(high);
        prop_assert_eq!(pair.low(), (word & 0xFF) as u8);
        pair.set_low(low);
        prop_assert_eq!(pair.high(), high);
        prop_assert_eq!(pair.word(), u16::from_be_bytes([high, low]));
    }

    #[test]
    fn prop_setting_one_flag_touches_only_its_bit(
        af in any::<u16>(),
        flag in all_flags(),
        value in any::<bool>(),
    ) {
        let mut regs = Registers::default();
        regs.set_af(af);
        let before = regs.af();

        regs.set_flag(flag, value);

        prop_assert_eq!(regs.flag(flag), value);
        prop_assert_eq!(regs.a(), (af >> 8) as u8);
        prop_assert_eq!(regs.af() & !u16::from(flag.bits()), before & !u16::from(flag.bits()));
        prop_assert_eq!(regs.f() & 0x0F, 0);
    }

    #[test]
    fn prop_work_ram_writes_appear_in_echo(addr in 0xC000u16..=0xDFFF, value in any::<u8>()) {
        let mut memory = Memory::new();
        memory.write_byte(addr, value);
        prop_assert_eq!(memory.read_byte(addr), value);
        prop_assert_eq!(memory.read_byte(addr + 0x2000), value);
    }

    #[test]
    fn prop_echo_writes_appear_in_work_ram(addr in 0xE000u16..=0xFDFF, value in any::<u8>()) {
        let mut memory = Memory::new();
        memory.write_byte(addr, value);
        prop_assert_eq!(memory.read_byte(addr), value);
        prop_assert_eq!(memory.read_byte(addr - 0x2000), value);
    }

    #[test]
    fn prop_unusable_range_ignores_writes(addr in 0xFEA0u16..=0xFEFF, value in any::<u8>()) {
        let mut memory = Memory::new();
        let before = memory.read_byte(addr);
        memory.write_byte(addr, value);
        prop_assert_eq!(memory.read_byte(addr), before);
    }

    #[test]
    fn prop_rom_window_never_changes(addr in 0x0000u16..=0x7FFF, value in any::<u8>()) {
        let mut memory = Memory::new();
        memory.load_rom(&[0x5Au8; 0x100]).unwrap();
        let before = memory.read_byte(addr);
        memory.write_byte(addr, value);
        prop_assert_eq!(memory.read_byte(addr), before);
    }

    #[test]
    fn prop_push_pop_restores_value_and_sp(
        value in any::<u16>(),
        sp in 0xC100u16..=0xDF00,
        pair in 0usize..3,
    ) {
        // PUSH BC/DE/HL then POP into the same pair after clobbering it.
        let push = [0xC5, 0xD5, 0xE5][pair];
        let pop = [0xC1, 0xD1, 0xE1][pair];

        let mut cpu = Cpu::new();
        let mut bus = FlatBus::new();
        bus.memory[0] = push;
        bus.memory[1] = pop;
        cpu.regs.pc = 0;
        cpu.regs.sp = sp;
        set_pair(&mut cpu.regs, pair, value);

        cpu.step(&mut bus).unwrap();
        prop_assert_eq!(cpu.regs.sp, sp.wrapping_sub(2));
        set_pair(&mut cpu.regs, pair, !value);
        cpu.step(&mut bus).unwrap();

        prop_assert_eq!(pair_value(&cpu.regs, pair), value);
        prop_assert_eq!(cpu.regs.sp, sp);
    }

    #[test]
    fn prop_pc_advances_by_instruction_length(
        opcode in prop::sample::select(non_branching_opcodes()),
        operand1 in any::<u8>(),
        operand2 in any::<u8>(),
    ) {
        let info = opcode_info(opcode);
        let mut cpu = Cpu::new();
        let mut bus = FlatBus::new();
        bus.memory[0x0200] = opcode;
        bus.memory[0x0201] = operand1;
        bus.memory[0x0202] = operand2;
        cpu.regs.pc = 0x0200;

        let cycles = cpu.step(&mut bus).unwrap();

        prop_assert_eq!(
            cpu.regs.pc,
            0x0200 + info.length as u16,
            "opcode 0x{:02X} ({})",
            opcode,
            info.mnemonic
        );
        prop_assert_eq!(cycles, info.cycles);
    }

    #[test]
    fn prop_prefixed_instructions_are_two_bytes(cb in any::<u8>(), hl in 0xC000u16..=0xDFFF) {
        let mut cpu = Cpu::new();
        let mut bus = FlatBus::new();
        bus.memory[0x0200] = 0xCB;
        bus.memory[0x0201] = cb;
        cpu.regs.pc = 0x0200;
        cpu.regs.set_hl(hl);

        let cycles = cpu.step(&mut bus).unwrap();

        prop_assert_eq!(cpu.regs.pc, 0x0202);
        prop_assert_eq!(cycles, cb_opcode_info(cb).cycles);
    }

    #[test]
    fn prop_failed_steps_leave_the_cpu_untouched(
        opcode in prop::sample::select(vec![
            0xD3u8, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
        ]),
        pc in 0x0000u16..=0xFFF0,
        af in any::<u16>(),
        bc in any::<u16>(),
    ) {
        let mut cpu = Cpu::new();
        let mut bus = FlatBus::new();
        bus.memory[pc as usize] = opcode;
        cpu.regs.pc = pc;
        cpu.regs.set_af(af);
        cpu.regs.set_bc(bc);
        let before = cpu.snapshot();

        let err = cpu.step(&mut bus).unwrap_err();

        prop_assert_eq!(err, Error::Unimplemented { opcode, pc });
        prop_assert_eq!(cpu.snapshot(), before);
    }

    #[test]
    fn prop_add_immediate_matches_wide_arithmetic(a in any::<u8>(), value in any::<u8>()) {
        let mut cpu = Cpu::new();
        let mut bus = FlatBus::new();
        bus.memory[0] = 0xC6;
        bus.memory[1] = value;
        cpu.regs.pc = 0;
        cpu.regs.set_a(a);

        cpu.step(&mut bus).unwrap();

        let wide = a as u16 + value as u16;
        prop_assert_eq!(cpu.regs.a(), wide as u8);
        prop_assert_eq!(cpu.get_flag(Flags::ZERO), wide as u8 == 0);
        prop_assert!(!cpu.get_flag(Flags::SUBTRACT));
        prop_assert_eq!(cpu.get_flag(Flags::HALF_CARRY), (a & 0x0F) + (value & 0x0F) > 0x0F);
        prop_assert_eq!(cpu.get_flag(Flags::CARRY), wide > 0xFF);
    }
}
