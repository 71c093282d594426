use std::time::Duration;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: a single u32 little-endian length.
pub const HEADER_SIZE: usize = 4;

/// Default maximum payload accepted when reading: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// One decoded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub payload: Bytes,
}

impl Frame {
    /// Header plus payload.
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

/// Append the wire encoding of `payload` to `dst`.
///
/// ```text
/// ┌──────────────┬──────────────────┐
/// │ Length (4B)  │ Payload          │
/// │ u32 LE       │ (Length bytes)   │
/// └──────────────┴──────────────────┘
/// ```
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    let len = u32::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: payload.len(),
        max: u32::MAX as usize,
    })?;
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u32_le(len);
    dst.put_slice(payload);
    Ok(())
}

/// Decode one frame from the front of `src`.
///
/// Returns `Ok(None)` until a complete frame is buffered; on success the
/// frame's bytes are consumed from `src`.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Frame>> {
    if src.len() < HEADER_SIZE {
        return Ok(None);
    }

    let mut header = [0u8; HEADER_SIZE];
    header.copy_from_slice(&src[..HEADER_SIZE]);
    let payload_len = u32::from_le_bytes(header) as usize;

    if payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    if src.len() < HEADER_SIZE + payload_len {
        return Ok(None);
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();
    Ok(Some(Frame { payload }))
}

/// Limits and timeouts applied by [`FrameReader`](crate::FrameReader) and
/// [`FrameWriter`](crate::FrameWriter).
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 16 MiB.
    pub max_payload_size: usize,
    /// Read timeout for blocking socket reads. `None` waits forever.
    pub read_timeout: Option<Duration>,
    /// Write timeout for blocking socket writes. `None` waits forever.
    pub write_timeout: Option<Duration>,
}

impl FrameConfig {
    /// No payload cap beyond what the length prefix can express.
    pub fn unbounded() -> Self {
        Self {
            max_payload_size: u32::MAX as usize,
            ..Self::default()
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            read_timeout: None,
            write_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_one_wire_bytes() {
        let mut buf = BytesMut::new();
        encode_frame(b"SELECT 1", &mut buf).unwrap();
        assert_eq!(
            buf.as_ref(),
            &[0x08, 0x00, 0x00, 0x00, b'S', b'E', b'L', b'E', b'C', b'T', b' ', b'1']
        );
    }

    #[test]
    fn length_counts_utf8_bytes_not_chars() {
        let query = "agent='é'";
        let mut buf = BytesMut::new();
        encode_frame(query.as_bytes(), &mut buf).unwrap();
        assert_eq!(&buf[..HEADER_SIZE], &10u32.to_le_bytes());
        assert_eq!(buf.len(), HEADER_SIZE + 10);
    }

    #[test]
    fn decode_waits_for_header_and_payload() {
        let mut buf = BytesMut::from(&[0x05, 0x00][..]);
        assert!(decode_frame(&mut buf, DEFAULT_MAX_PAYLOAD).unwrap().is_none());

        let mut buf = BytesMut::new();
        encode_frame(b"hello", &mut buf).unwrap();
        buf.truncate(HEADER_SIZE + 2);
        assert!(decode_frame(&mut buf, DEFAULT_MAX_PAYLOAD).unwrap().is_none());
        assert_eq!(buf.len(), HEADER_SIZE + 2, "partial input must stay buffered");
    }

    #[test]
    fn decode_consumes_back_to_back_frames() {
        let mut buf = BytesMut::new();
        encode_frame(b"{\"type\":\"ready\"}", &mut buf).unwrap();
        encode_frame(b"", &mut buf).unwrap();

        let first = decode_frame(&mut buf, DEFAULT_MAX_PAYLOAD).unwrap().unwrap();
        assert_eq!(first.payload.as_ref(), b"{\"type\":\"ready\"}");
        let second = decode_frame(&mut buf, DEFAULT_MAX_PAYLOAD).unwrap().unwrap();
        assert!(second.payload.is_empty());
        assert_eq!(second.wire_size(), HEADER_SIZE);
        assert!(buf.is_empty());
    }

    #[test]
    fn decode_rejects_oversized_length_before_buffering() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(64);
        let result = decode_frame(&mut buf, 32);
        assert!(matches!(
            result,
            Err(FrameError::PayloadTooLarge { size: 64, max: 32 })
        ));
    }
}
