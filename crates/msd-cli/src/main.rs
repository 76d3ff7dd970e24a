use msd_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible; stderr only if the log file is unavailable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli::run_from_args() {
        eprintln!("msd-dl error: {:#}", err);
        std::process::exit(1);
    }
}
