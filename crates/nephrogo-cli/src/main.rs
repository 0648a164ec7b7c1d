use nephrogo_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Fall back to stderr when the state directory is not writable.
    if let Err(err) = logging::init_logging() {
        match logging::init_logging_stderr() {
            Ok(()) => tracing::warn!("file logging unavailable: {:#}", err),
            Err(stderr_err) => eprintln!("nephrogo: logging disabled: {:#}", stderr_err),
        }
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("nephrogo error: {:#}", err);
        std::process::exit(1);
    }
}
