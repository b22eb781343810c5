use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dotboy_core::{Machine, RunSummary};
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

pub const USAGE: &str = "usage: dotboy <rom> [max-steps] [--trace] [--quiet]";

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RunConfig {
    #[builder(setter(into))]
    pub rom_path: PathBuf,
    #[builder(default = DEFAULT_MAX_STEPS)]
    pub max_steps: u64,
    /// Print whatever the ROM sent over the serial port once the run ends.
    #[builder(default = true)]
    pub print_serial: bool,
    /// Log every instruction at `trace` level before it executes.
    #[builder(default = false)]
    pub trace: bool,
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub summary: RunSummary,
    pub serial: Vec<u8>,
}

/// Parse `dotboy <rom> [max-steps] [--trace] [--quiet]`.
pub fn parse_args<I>(args: I) -> Result<RunConfig>
where
    I: IntoIterator<Item = String>,
{
    let mut rom_path = None;
    let mut max_steps = DEFAULT_MAX_STEPS;
    let mut trace = false;
    let mut quiet = false;
    let mut positional = 0;

    for arg in args {
        match arg.as_str() {
            "--trace" => trace = true,
            "--quiet" | "-q" => quiet = true,
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n{USAGE}"),
            _ => {
                match positional {
                    0 => rom_path = Some(PathBuf::from(&arg)),
                    1 => {
                        max_steps = arg
                            .parse()
                            .with_context(|| format!("invalid step count '{arg}'"))?
                    }
                    _ => bail!("unexpected argument '{arg}'\n{USAGE}"),
                }
                positional += 1;
            }
        }
    }

    let Some(rom_path) = rom_path else {
        bail!("no ROM path provided\n{USAGE}");
    };

    Ok(RunConfig::builder()
        .rom_path(rom_path)
        .max_steps(max_steps)
        .print_serial(!quiet)
        .trace(trace)
        .build())
}

pub fn run(config: &RunConfig) -> Result<Outcome> {
    let rom = std::fs::read(&config.rom_path)
        .with_context(|| format!("failed to read ROM file {}", config.rom_path.display()))?;
    log::info!(
        "Running ROM '{}' ({} bytes)",
        config.rom_path.display(),
        rom.len()
    );
    run_rom(&rom, config)
}

/// Run an in-memory ROM image; `config.rom_path` is only used for messages.
pub fn run_rom(rom: &[u8], config: &RunConfig) -> Result<Outcome> {
    let mut machine = Machine::new();
    machine
        .load_rom(rom)
        .with_context(|| format!("failed to load ROM {}", config.rom_path.display()))?;
    log::debug!("cartridge uses {:?}", machine.memory.bank_controller());

    let summary = if config.trace {
        machine.run_with(config.max_steps, |cpu, memory| {
            let info = cpu.decode_at(memory, cpu.regs.pc);
            log::trace!("{} {}", cpu.snapshot(), info.mnemonic);
        })
    } else {
        machine.run(config.max_steps)
    };
    log::info!("{summary}");

    Ok(Outcome {
        summary,
        serial: machine.memory.take_serial_output(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotboy_core::{Error, StopReason};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_args_uses_defaults() {
        let config = parse_args(args(&["game.gb"])).unwrap();
        assert_eq!(config, RunConfig::builder().rom_path("game.gb").build());
        assert_eq!(config.max_steps, DEFAULT_MAX_STEPS);
        assert!(config.print_serial);
        assert!(!config.trace);
    }

    #[test]
    fn parse_args_reads_steps_and_switches() {
        let config = parse_args(args(&["--trace", "cpu.gb", "500", "--quiet"])).unwrap();
        assert_eq!(config.rom_path, PathBuf::from("cpu.gb"));
        assert_eq!(config.max_steps, 500);
        assert!(config.trace);
        assert!(!config.print_serial);
    }

    #[test]
    fn parse_args_rejects_bad_input() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["a.gb", "many"])).is_err());
        assert!(parse_args(args(&["a.gb", "1", "extra"])).is_err());
        assert!(parse_args(args(&["a.gb", "--fast"])).is_err());
    }

    #[test]
    fn run_rom_collects_serial_output() {
        // LD A,'k'; LDH (SB),A; LD A,0x81; LDH (SC),A; HALT
        let rom = [0x3E, b'k', 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02, 0x76];
        let config = RunConfig::builder().rom_path("inline").build();

        // Pad up to the 0x0100 entry point.
        let mut image = vec![0x00; 0x100];
        image.extend_from_slice(&rom);

        let outcome = run_rom(&image, &config).unwrap();
        assert_eq!(outcome.serial, b"k");
        assert_eq!(outcome.summary.stop, StopReason::Halted);
    }

    #[test]
    fn run_rom_reports_the_first_unimplemented_opcode() {
        let mut image = vec![0x00; 0x100];
        image.push(0xED);
        let config = RunConfig::builder()
            .rom_path("inline")
            .trace(true)
            .build();

        let outcome = run_rom(&image, &config).unwrap();
        assert_eq!(outcome.summary.steps, 0);
        assert_eq!(
            outcome.summary.stop,
            StopReason::Fault(Error::Unimplemented {
                opcode: 0xED,
                pc: 0x0100
            })
        );
    }

    #[test]
    fn run_rom_rejects_empty_images() {
        let config = RunConfig::builder().rom_path("empty.gb").build();
        let err = run_rom(&[], &config).unwrap_err();
        assert!(err.to_string().contains("empty.gb"));
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::EmptyRom));
    }

    #[test]
    fn run_reports_missing_files() {
        let config = RunConfig::builder()
            .rom_path("/definitely/not/here.gb")
            .build();
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("failed to read ROM file"));
    }

    #[test]
    fn run_reads_rom_from_disk() {
        let path = std::env::temp_dir().join(format!("dotboy-run-{}.gb", std::process::id()));
        let mut image = vec![0x00; 0x100];
        image.push(0x76);
        std::fs::write(&path, &image).unwrap();

        let config = RunConfig::builder().rom_path(path.clone()).max_steps(10).build();
        let outcome = run(&config).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(outcome.summary.steps, 1);
        assert_eq!(outcome.summary.stop, StopReason::Halted);
    }
}
