//! Small hand-assembled programs run end to end through `Machine`.

use dotboy_core::{BankController, BootState, Error, Machine, StopReason};

fn raw_machine(program: &[u8]) -> Machine {
    let mut machine = Machine::with_boot_state(BootState::builder().pc(0x0000).build());
    machine.load_rom(program).unwrap();
    machine
}

#[test]
fn prints_a_string_over_serial() {
    let mut program = vec![
        0x21, 0x20, 0x00, // 0x00: LD HL,0x0020
        0x2A, //             0x03: LD A,(HL+)
        0xA7, //             0x04: AND A
        0x28, 0x08, //       0x05: JR Z,0x0F
        0xE0, 0x01, //       0x07: LDH (SB),A
        0x3E, 0x81, //       0x09: LD A,0x81
        0xE0, 0x02, //       0x0B: LDH (SC),A
        0x18, 0xF4, //       0x0D: JR 0x03
        0x76, //             0x0F: HALT
    ];
    program.resize(0x20, 0x00);
    program.extend_from_slice(b"Hi!\0");

    let mut machine = raw_machine(&program);
    let summary = machine.run(1_000);

    assert_eq!(summary.stop, StopReason::Halted);
    assert_eq!(machine.serial_output(), b"Hi!");
    assert_eq!(summary.steps, 1 + 3 * 7 + 3 + 1);
    assert_eq!(summary.cycles, 12 + 3 * 64 + 24 + 4);
}

#[test]
fn subroutine_loop_uses_the_stack_in_work_ram() {
    let program = [
        0x31, 0x00, 0xD0, // 0x00: LD SP,0xD000
        0x06, 0x05, //       0x03: LD B,5
        0xAF, //             0x05: XOR A
        0xCD, 0x10, 0x00, // 0x06: CALL 0x0010
        0x05, //             0x09: DEC B
        0x20, 0xFA, //       0x0A: JR NZ,0x06
        0xEA, 0x00, 0xC0, // 0x0C: LD (0xC000),A
        0x76, //             0x0F: HALT
        0xC6, 0x03, //       0x10: ADD A,3
        0xC9, //             0x12: RET
    ];

    let mut machine = raw_machine(&program);
    let summary = machine.run(1_000);

    assert_eq!(summary.stop, StopReason::Halted);
    assert_eq!(machine.cpu.regs.a(), 15);
    assert_eq!(machine.cpu.regs.sp, 0xD000);
    assert_eq!(machine.memory.read_byte(0xC000), 15);
    assert_eq!(machine.memory.read_byte(0xE000), 15);
}

#[test]
fn mbc1_program_switches_banks() {
    let mut rom = vec![0u8; 4 * 0x4000];
    for (bank, chunk) in rom.chunks_mut(0x4000).enumerate() {
        chunk[0] = 0xB0 | bank as u8;
    }
    rom[0x147] = 0x01;
    let code = [
        0x3E, 0x02, //       LD A,2
        0xEA, 0x00, 0x20, // LD (0x2000),A
        0xFA, 0x00, 0x40, // LD A,(0x4000)
        0xEA, 0x00, 0xC0, // LD (0xC000),A
        0x3E, 0x03, //       LD A,3
        0xEA, 0x00, 0x20, // LD (0x2000),A
        0xFA, 0x00, 0x40, // LD A,(0x4000)
        0xEA, 0x01, 0xC0, // LD (0xC001),A
        0x76, //             HALT
    ];
    rom[0x100..0x100 + code.len()].copy_from_slice(&code);

    let mut machine = Machine::new();
    machine.load_rom(&rom).unwrap();
    assert_eq!(machine.memory.bank_controller(), BankController::Mbc1);

    let summary = machine.run(100);
    assert_eq!(summary.stop, StopReason::Halted);
    assert_eq!(machine.memory.read_byte(0xC000), 0xB2);
    assert_eq!(machine.memory.read_byte(0xC001), 0xB3);
    assert_eq!(machine.memory.rom_bank(), 3);
    // The bank-select writes did not touch ROM.
    assert_eq!(machine.memory.read_byte(0x2000), 0x00);
}

#[test]
fn code_copied_to_work_ram_runs_from_echo() {
    let mut machine = raw_machine(&[0x00]);
    // LD A,0x5A; HALT
    for (offset, byte) in [0x3E, 0x5A, 0x76].into_iter().enumerate() {
        machine.memory.write_byte(0xC000 + offset as u16, byte);
    }

    assert_eq!(machine.force_pc(0xE000, true).unwrap(), 8);
    assert_eq!(machine.cpu.regs.a(), 0x5A);
    assert_eq!(machine.snapshot().pc, 0xE002);
}

#[test]
fn enumerating_gaps_with_force_pc() {
    // Every hole fails at its own address without disturbing the CPU.
    let holes = [
        0xD3u8, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ];
    let mut machine = raw_machine(&holes);

    for (index, &opcode) in holes.iter().enumerate() {
        let pc = index as u16;
        let err = machine.force_pc(pc, true).unwrap_err();
        assert_eq!(err, Error::Unimplemented { opcode, pc });
        assert_eq!(machine.snapshot().pc, pc);
    }
}

#[test]
fn header_rom_starts_at_the_entry_point() {
    let mut rom = vec![0u8; 0x8000];
    // Entry point: NOP; JP 0x0150
    rom[0x100..0x104].copy_from_slice(&[0x00, 0xC3, 0x50, 0x01]);
    // 0x150: LD A,0x42; STOP
    rom[0x150..0x154].copy_from_slice(&[0x3E, 0x42, 0x10, 0x00]);

    let mut machine = Machine::new();
    machine.load_rom(&rom).unwrap();
    let summary = machine.run(100);

    assert_eq!(summary.stop, StopReason::Stopped);
    assert_eq!(summary.steps, 4);
    assert_eq!(summary.cycles, 4 + 16 + 8 + 4);
    assert_eq!(machine.cpu.regs.a(), 0x42);
    assert_eq!(machine.snapshot().pc, 0x0154);
}
