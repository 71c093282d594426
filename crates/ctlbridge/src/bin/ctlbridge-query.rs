use clap::Parser;
use ctlbridge::cli::logging::init_logging;
use ctlbridge::cli::query::{self, QueryArgs};
use ctlbridge::cli::settings::Settings;

fn main() {
    let args = QueryArgs::parse();
    if let Ok(settings) = Settings::from_env() {
        init_logging(&settings, false);
    }

    match query::run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
