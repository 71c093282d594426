use crate::cli::exit::{CliError, CliResult, FAILURE, INTERNAL};

/// SIGINT and SIGTERM end the process immediately with exit code 1.
pub fn exit_on_termination() -> CliResult<()> {
    ctrlc::set_handler(|| std::process::exit(FAILURE))
        .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
