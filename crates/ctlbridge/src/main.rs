use std::io;

use ctlbridge::cli::exit::{CliResult, FAILURE};
use ctlbridge::cli::logging::init_logging;
use ctlbridge::cli::request::{self, Invocation};
use ctlbridge::cli::settings::Settings;
use ctlbridge::cli::signal::exit_on_termination;
use ctlbridge::dispatch::load;
use tracing::debug;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

fn run() -> CliResult<i32> {
    let options = match request::parse_args(std::env::args_os())? {
        Invocation::Help => {
            println!("{}", request::USAGE);
            return Ok(FAILURE);
        }
        Invocation::Run(options) => options,
    };

    exit_on_termination()?;

    let settings = Settings::from_env()?;
    init_logging(&settings, options.debug);

    let init = load(&settings.dispatch);
    debug!(ready = init.is_ready(), path = ?settings.dispatch.socket_path, "dispatcher loaded");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    request::run(init, options, stdin.lock(), &mut stdout)
}
