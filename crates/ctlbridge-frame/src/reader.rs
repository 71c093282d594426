use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use ctlbridge_transport::IpcStream;

use crate::codec::{decode_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};
use crate::writer::transport_to_frame_error;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete frames from any `Read` stream.
///
/// Partial reads are buffered internally; callers always get whole frames.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
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

    /// Read the next complete frame (blocking).
    ///
    /// EOF, clean or mid-frame, surfaces as [`FrameError::ConnectionClosed`].
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if let Some(frame) = decode_frame(&mut self.buf, self.config.max_payload_size)? {
                return Ok(frame);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }
}

impl FrameReader<IpcStream> {
    /// Wrap a socket stream, applying the configured read timeout.
    pub fn with_config_ipc(inner: IpcStream, config: FrameConfig) -> Result<Self> {
        inner
            .set_read_timeout(config.read_timeout)
            .map_err(transport_to_frame_error)?;
        Ok(Self::with_config(inner, config))
    }
}
