//! Stderr diagnostics for both binaries. Stdout carries only the JSON document.

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

use crate::cli::settings::Settings;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Ordered from quietest to noisiest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Level in effect for a run. `--debug` raises it to at least `debug`
    /// but never hides `trace` output that was asked for.
    pub fn for_run(self, debug: bool) -> Self {
        if debug {
            self.max(LogLevel::Debug)
        } else {
            self
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the stderr subscriber from the environment settings.
///
/// A second call is a no-op; the first subscriber wins.
pub fn init_logging(settings: &Settings, debug: bool) {
    let level = settings.log_level.for_run(debug);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::from(level))
        .with_ansi(false)
        .with_target(false);

    let _ = match settings.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_raises_quiet_levels() {
        assert_eq!(LogLevel::Warn.for_run(true), LogLevel::Debug);
        assert_eq!(LogLevel::Error.for_run(true), LogLevel::Debug);
        assert_eq!(LogLevel::Warn.for_run(false), LogLevel::Warn);
    }

    #[test]
    fn debug_flag_keeps_trace() {
        assert_eq!(LogLevel::Trace.for_run(true), LogLevel::Trace);
    }

    #[test]
    fn levels_map_to_filters() {
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
    }
}
