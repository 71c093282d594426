//! Environment-driven configuration.
//!
//! `ctlbridge-request` only accepts four flags, so everything else comes
//! from the environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use ctlbridge_dispatch::DispatchConfig;

use crate::cli::exit::{CliError, CliResult, FAILURE};
use crate::cli::logging::{LogFormat, LogLevel};

pub const ENV_DISPATCH_SOCKET: &str = "CTLBRIDGE_DISPATCH_SOCKET";
pub const ENV_DISPATCH_TIMEOUT: &str = "CTLBRIDGE_DISPATCH_TIMEOUT";
pub const ENV_LOG_LEVEL: &str = "CTLBRIDGE_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "CTLBRIDGE_LOG_FORMAT";

#[derive(Debug, Clone)]
pub struct Settings {
    pub dispatch: DispatchConfig,
    pub log_format: LogFormat,
    pub log_level: LogLevel,
}

impl Settings {
    pub fn from_env() -> CliResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CliResult<Self> {
        let mut dispatch = DispatchConfig::default();
        if let Some(path) = non_empty(lookup(ENV_DISPATCH_SOCKET)) {
            dispatch.socket_path = PathBuf::from(path);
        }
        if let Some(timeout) = non_empty(lookup(ENV_DISPATCH_TIMEOUT)) {
            dispatch.timeout = Some(parse_duration(&timeout).map_err(|err| {
                CliError::new(FAILURE, format!("{ENV_DISPATCH_TIMEOUT}: {err}"))
            })?);
        }

        let log_format = match non_empty(lookup(ENV_LOG_FORMAT)) {
            Some(raw) => parse_enum(ENV_LOG_FORMAT, &raw)?,
            None => LogFormat::Text,
        };
        let log_level = match non_empty(lookup(ENV_LOG_LEVEL)) {
            Some(raw) => parse_enum(ENV_LOG_LEVEL, &raw)?,
            None => LogLevel::Warn,
        };

        Ok(Self {
            dispatch,
            log_format,
            log_level,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_enum<T: ValueEnum>(key: &str, raw: &str) -> CliResult<T> {
    T::from_str(raw.trim(), true)
        .map_err(|_| CliError::new(FAILURE, format!("{key}: unsupported value '{raw}'")))
}

/// Parse `5s`, `500ms` or a bare number of seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("duration must not be empty".to_string());
    }

    let (number, millis) = if let Some(num) = input.strip_suffix("ms") {
        (num, true)
    } else if let Some(num) = input.strip_suffix('s') {
        (num, false)
    } else {
        (input, false)
    };

    let value: u64 = number
        .parse()
        .map_err(|_| format!("invalid duration value: {input}"))?;
    if value == 0 {
        return Err("duration must be greater than zero".to_string());
    }

    Ok(if millis {
        Duration::from_millis(value)
    } else {
        Duration::from_secs(value)
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ctlbridge_dispatch::DEFAULT_SOCKET_PATH;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> CliResult<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.dispatch.socket_path, PathBuf::from(DEFAULT_SOCKET_PATH));
        assert_eq!(s.dispatch.timeout, None);
        assert_eq!(s.log_level, LogLevel::Warn);
        assert_eq!(s.log_format, LogFormat::Text);
    }

    #[test]
    fn environment_overrides() {
        let s = settings(&[
            (ENV_DISPATCH_SOCKET, "/tmp/dapi.sock"),
            (ENV_DISPATCH_TIMEOUT, "250ms"),
            (ENV_LOG_LEVEL, "DEBUG"),
            (ENV_LOG_FORMAT, "json"),
        ])
        .unwrap();
        assert_eq!(s.dispatch.socket_path, PathBuf::from("/tmp/dapi.sock"));
        assert_eq!(s.dispatch.timeout, Some(Duration::from_millis(250)));
        assert_eq!(s.log_level, LogLevel::Debug);
        assert_eq!(s.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let s = settings(&[(ENV_DISPATCH_SOCKET, "  "), (ENV_LOG_LEVEL, "")]).unwrap();
        assert_eq!(s.dispatch.socket_path, PathBuf::from(DEFAULT_SOCKET_PATH));
        assert_eq!(s.log_level, LogLevel::Warn);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = settings(&[(ENV_LOG_LEVEL, "loud")]).unwrap_err();
        assert_eq!(err.code, FAILURE);
        assert!(err.message.contains(ENV_LOG_LEVEL));

        assert!(settings(&[(ENV_DISPATCH_TIMEOUT, "0s")]).is_err());
    }

    #[test]
    fn parse_duration_forms() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
        assert!(parse_duration("soon").is_err());
    }
}
