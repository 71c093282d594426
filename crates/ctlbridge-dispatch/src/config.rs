use std::path::PathBuf;
use std::time::Duration;

use ctlbridge_frame::{FrameConfig, DEFAULT_MAX_PAYLOAD};

/// Where the dispatcher listens when nothing else is configured.
pub const DEFAULT_SOCKET_PATH: &str = "/var/ossec/queue/cluster/c-internal.sock";

/// How to reach the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub socket_path: PathBuf,
    /// Read/write timeout on the socket. `None` waits for as long as the
    /// dispatcher takes.
    pub timeout: Option<Duration>,
    /// Largest response frame accepted.
    pub max_response_size: usize,
}

impl DispatchConfig {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            max_payload_size: self.max_response_size,
            read_timeout: self.timeout,
            write_timeout: self.timeout,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            timeout: None,
            max_response_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}
