use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use ctlbridge_frame::{FrameError, FrameReader, FrameWriter};
use ctlbridge_transport::{IpcStream, UnixDomainSocket};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::DispatchConfig;
use crate::dispatcher::{Dispatcher, DistributeOptions};
use crate::error::{DispatchError, Result};
use crate::protocol::{DispatchRequest, DispatchResponse, PROTOCOL_VERSION};

/// Dispatcher reached over its control socket.
///
/// One connection per process: the hello happens in [`connect`](Self::connect)
/// and every later call reuses the same stream.
pub struct SocketDispatcher {
    path: PathBuf,
    reader: FrameReader<IpcStream>,
    writer: FrameWriter<IpcStream>,
    timeout: Option<Duration>,
}

impl SocketDispatcher {
    /// Connect and complete the hello exchange.
    pub fn connect(config: &DispatchConfig) -> Result<Self> {
        let stream = UnixDomainSocket::connect(&config.socket_path)?;
        let reader_stream = stream.try_clone()?;
        let frame_config = config.frame_config();

        let mut dispatcher = Self {
            path: config.socket_path.clone(),
            reader: FrameReader::with_config_ipc(reader_stream, frame_config.clone())?,
            writer: FrameWriter::with_config_ipc(stream, frame_config)?,
            timeout: config.timeout,
        };

        match dispatcher.round_trip(&DispatchRequest::Hello {
            version: PROTOCOL_VERSION,
        })? {
            DispatchResponse::Ready { version } if version == PROTOCOL_VERSION => {
                debug!(path = ?dispatcher.path, version, "dispatcher ready");
                Ok(dispatcher)
            }
            DispatchResponse::Ready { version } => Err(DispatchError::Protocol(format!(
                "dispatcher speaks protocol version {version}, expected {PROTOCOL_VERSION}"
            ))),
            other => Err(unexpected("ready", &other)),
        }
    }

    fn round_trip(&mut self, request: &DispatchRequest) -> Result<DispatchResponse> {
        let payload = serde_json::to_vec(request)?;
        self.writer
            .send(&payload)
            .map_err(|err| self.frame_error(err))?;

        let frame = self
            .reader
            .read_frame()
            .map_err(|err| self.frame_error(err))?;
        debug!(bytes = frame.payload.len(), "dispatcher answered");

        match serde_json::from_slice::<DispatchResponse>(&frame.payload)? {
            DispatchResponse::Fault { message, code } => Err(DispatchError::Fault { message, code }),
            DispatchResponse::Error { message } => Err(DispatchError::Remote(message)),
            response => Ok(response),
        }
    }

    fn frame_error(&self, err: FrameError) -> DispatchError {
        match (err, self.timeout) {
            (FrameError::Io(io), Some(timeout))
                if matches!(io.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
            {
                DispatchError::Timeout(timeout)
            }
            (err, _) => DispatchError::Frame(err),
        }
    }
}

impl Dispatcher for SocketDispatcher {
    fn functions(&mut self) -> Result<Vec<String>> {
        match self.round_trip(&DispatchRequest::ListFunctions)? {
            DispatchResponse::Functions { functions } => Ok(functions),
            other => Err(unexpected("functions", &other)),
        }
    }

    fn distribute(
        &mut self,
        request: Map<String, Value>,
        options: DistributeOptions,
    ) -> Result<String> {
        let request = DispatchRequest::Distribute {
            input_json: Value::Object(request),
            debug: options.debug,
            pretty: options.pretty,
        };
        match self.round_trip(&request)? {
            DispatchResponse::Data { data } => Ok(data),
            other => Err(unexpected("result", &other)),
        }
    }
}

fn unexpected(expected: &str, got: &DispatchResponse) -> DispatchError {
    DispatchError::Protocol(format!("expected '{expected}' message, got '{}'", got.kind()))
}
