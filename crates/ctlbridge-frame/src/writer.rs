use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use ctlbridge_transport::{IpcStream, TransportError};
use tracing::trace;

use crate::codec::{encode_frame, FrameConfig};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Writes complete frames to any `Write` stream.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Write> FrameWriter<T> {
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Encode `payload` and write the whole frame (blocking), then flush.
    pub fn send(&mut self, payload: &[u8]) -> Result<()> {
        if payload.len() > self.config.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size: payload.len(),
                max: self.config.max_payload_size,
            });
        }

        self.buf.clear();
        encode_frame(payload, &mut self.buf)?;
        trace!(bytes = self.buf.len(), "writing frame");

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl FrameWriter<IpcStream> {
    /// Wrap a socket stream, applying the configured write timeout.
    pub fn with_config_ipc(inner: IpcStream, config: FrameConfig) -> Result<Self> {
        inner
            .set_write_timeout(config.write_timeout)
            .map_err(transport_to_frame_error)?;
        Ok(Self::with_config(inner, config))
    }
}

pub(crate) fn transport_to_frame_error(err: TransportError) -> FrameError {
    match err {
        TransportError::Io(io) | TransportError::Accept(io) => FrameError::Io(io),
        TransportError::Bind { source, .. } | TransportError::Connect { source, .. } => {
            FrameError::Io(source)
        }
        other => FrameError::Io(std::io::Error::other(other.to_string())),
    }
}
