use dotboy_core::StopReason;

fn main() {
    env_logger::init();

    let config = match dotboy::parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(2);
        }
    };

    let outcome = match dotboy::run(&config) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };

    if config.print_serial && !outcome.serial.is_empty() {
        println!("{}", String::from_utf8_lossy(&outcome.serial));
    }
    println!("{}", outcome.summary);

    if let StopReason::Fault(_) = outcome.summary.stop {
        std::process::exit(1);
    }
}
