use std::fmt;
use std::io;

use ctlbridge_frame::FrameError;
use ctlbridge_transport::TransportError;

// Process exit codes.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Argument and usage problems, always exit 1 with a pointer to `--help`.
    pub fn usage(message: impl fmt::Display) -> Self {
        Self::new(
            FAILURE,
            format!("{message}\nTry '--help' for more information."),
        )
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

fn io_exit_code(kind: io::ErrorKind) -> i32 {
    match kind {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound | io::ErrorKind::ConnectionRefused => FAILURE,
        _ => INTERNAL,
    }
}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::new(io_exit_code(err.kind()), format!("{context}: {err}"))
}

/// Exit code follows the I/O error kind; the message keeps the socket path.
pub fn transport_error(context: &str, err: TransportError) -> CliError {
    let code = match err.io_source() {
        Some(source) => io_exit_code(source.kind()),
        None => DATA_INVALID,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn connect_failures_map_by_io_kind() {
        let refused = TransportError::Connect {
            path: PathBuf::from("/var/ossec/queue/db/wdb"),
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        };
        let err = transport_error("connect failed", refused);
        assert_eq!(err.code, FAILURE);
        assert!(err.message.contains("/var/ossec/queue/db/wdb"));

        let denied = TransportError::Connect {
            path: PathBuf::from("/var/ossec/queue/db/wdb"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let err = transport_error("connect failed", denied);
        assert_eq!(err.code, PERMISSION_DENIED);
        assert!(err.message.starts_with("connect failed: failed to connect to /var/ossec"));
    }

    #[test]
    fn long_socket_path_is_data_invalid() {
        let err = transport_error(
            "connect failed",
            TransportError::PathTooLong {
                path: PathBuf::from("/tmp/very/long.sock"),
                len: 120,
                max: 107,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("/tmp/very/long.sock"));
    }

    #[test]
    fn usage_errors_exit_one_with_hint() {
        let err = CliError::usage("Incorrect number of arguments.");
        assert_eq!(err.code, FAILURE);
        assert!(err.to_string().ends_with("Try '--help' for more information."));
    }

    #[test]
    fn oversized_query_is_data_invalid() {
        let err = frame_error(
            "send failed",
            FrameError::PayloadTooLarge { size: 10, max: 4 },
        );
        assert_eq!(err.code, DATA_INVALID);
    }
}
