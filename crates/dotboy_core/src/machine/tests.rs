use super::*;
use crate::cpu::BootState;

fn machine_with_program(program: &[u8]) -> Machine {
    let mut machine = Machine::with_boot_state(BootState::builder().pc(0x0000).build());
    machine.load_rom(program).unwrap();
    machine
}

#[test]
fn serial_program_runs_until_halt() {
    // LD A,'B'; LD (SB),A; LD A,0x81; LD (SC),A; HALT
    let mut machine = machine_with_program(&[
        0x3E, b'B', 0xEA, 0x01, 0xFF, 0x3E, 0x81, 0xEA, 0x02, 0xFF, 0x76,
    ]);

    let summary = machine.run(100);
    assert_eq!(summary.stop, StopReason::Halted);
    assert_eq!(summary.steps, 5);
    assert_eq!(summary.cycles, 8 + 16 + 8 + 16 + 4);
    assert_eq!(machine.serial_output(), b"B");
    assert!(machine.snapshot().halted);
}

#[test]
fn run_stops_at_unimplemented_opcode() {
    let mut machine = machine_with_program(&[0x00, 0xD3]);

    let summary = machine.run(100);
    assert_eq!(summary.steps, 1);
    assert_eq!(
        summary.stop,
        StopReason::Fault(Error::Unimplemented {
            opcode: 0xD3,
            pc: 0x0001
        })
    );
    assert_eq!(machine.snapshot().pc, 0x0001);
}

#[test]
fn run_respects_step_budget() {
    // JR -2
    let mut machine = machine_with_program(&[0x18, 0xFE]);

    let summary = machine.run(10);
    assert_eq!(summary.stop, StopReason::StepBudget);
    assert_eq!(summary.steps, 10);
    assert_eq!(summary.cycles, 120);
    assert_eq!(machine.snapshot().pc, 0x0000);
}

#[test]
fn run_stops_after_stop_instruction() {
    let mut machine = machine_with_program(&[0x10, 0x00, 0x00]);

    let summary = machine.run(100);
    assert_eq!(summary.stop, StopReason::Stopped);
    assert_eq!(summary.steps, 1);
    let snap = machine.snapshot();
    assert!(snap.stopped);
    assert_eq!(snap.pc, 0x0002);
}

#[test]
fn halt_resumes_when_an_interrupt_is_requested() {
    // LD A,1; LDH (IE),A; LDH (IF),A; HALT; NOP; <hole>
    let mut machine = machine_with_program(&[
        0x3E, 0x01, 0xE0, 0xFF, 0xE0, 0x0F, 0x76, 0x00, 0xD3,
    ]);

    let summary = machine.run(100);
    assert_eq!(summary.steps, 5);
    assert_eq!(summary.cycles, 8 + 12 + 12 + 4 + 4);
    assert_eq!(
        summary.stop,
        StopReason::Fault(Error::Unimplemented {
            opcode: 0xD3,
            pc: 0x0008
        })
    );
    assert!(!machine.snapshot().halted);
}

#[test]
fn force_pc_moves_and_optionally_executes() {
    let mut machine = machine_with_program(&[0x00, 0x3E, 0x99]);

    assert_eq!(machine.force_pc(0x0001, false).unwrap(), 0);
    assert_eq!(machine.snapshot().pc, 0x0001);
    assert_eq!(machine.cpu.regs.a(), 0x01);

    assert_eq!(machine.force_pc(0x0001, true).unwrap(), 8);
    assert_eq!(machine.cpu.regs.a(), 0x99);
    assert_eq!(machine.snapshot().pc, 0x0003);
}

#[test]
fn run_with_observes_every_instruction() {
    let mut machine = machine_with_program(&[0x00, 0x00, 0x3E, 0x01, 0x76]);

    let mut seen = Vec::new();
    let summary = machine.run_with(100, |cpu, _| seen.push(cpu.regs.pc));
    assert_eq!(summary.stop, StopReason::Halted);
    assert_eq!(seen, vec![0x0000, 0x0001, 0x0002, 0x0004]);
}

#[test]
fn load_rom_resets_the_cpu() {
    let mut machine = Machine::new();
    machine.cpu.regs.pc = 0x1234;
    machine.cpu.regs.set_a(0x00);
    machine.load_rom(&[0x00]).unwrap();

    let snap = machine.snapshot();
    assert_eq!(snap.pc, 0x0100);
    assert_eq!(snap.af.word(), 0x01B0);
    assert_eq!(snap.sp, 0xFFFE);
}

#[test]
fn reloading_starts_from_power_on_memory() {
    // LD A,'k'; LDH (SB),A; LD A,0x81; LDH (SC),A;
    // LD A,0x77; LD (0xC000),A; LDH (LCDC),A; HALT
    let mut machine = machine_with_program(&[
        0x3E, b'k', 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02, 0x3E, 0x77, 0xEA, 0x00, 0xC0, 0xE0,
        0x40, 0x76,
    ]);
    assert_eq!(machine.run(100).stop, StopReason::Halted);
    assert_eq!(machine.serial_output(), b"k");
    assert_eq!(machine.memory.read_byte(0xC000), 0x77);
    assert_eq!(machine.memory.read_byte(0xFF40), 0x77);

    machine.load_rom(&[0x76]).unwrap();

    assert!(machine.serial_output().is_empty());
    assert_eq!(machine.memory.read_byte(0xC000), 0x00);
    assert_eq!(machine.memory.read_byte(0xE000), 0x00);
    assert_eq!(machine.memory.read_byte(0xFF40), 0x91);
}

#[test]
fn machines_share_no_state() {
    let mut a = machine_with_program(&[0x00]);
    let b = machine_with_program(&[0x00]);

    a.memory.write_byte(0xC000, 0x77);
    a.cpu.regs.set_b(0x55);
    assert_eq!(b.memory.read_byte(0xC000), 0x00);
    assert_eq!(b.cpu.regs.b(), 0x00);
}

#[test]
fn summary_display_names_the_stop_reason() {
    let summary = RunSummary {
        steps: 3,
        cycles: 12,
        stop: StopReason::Fault(Error::Unimplemented {
            opcode: 0xDD,
            pc: 0x0150,
        }),
    };
    assert_eq!(
        summary.to_string(),
        "3 steps, 12 cycles: unimplemented opcode 0xdd at 0x0150"
    );
}
