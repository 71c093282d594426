//! Length-prefixed framing shared by the ctlbridge sockets.
//!
//! Every message on the wire is a 4-byte little-endian unsigned length
//! followed by exactly that many payload bytes. There is no magic, no
//! channel and no terminator: the database queue socket expects nothing
//! else, and the dispatcher socket carries JSON documents in the same
//! envelope.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{decode_frame, encode_frame, Frame, FrameConfig, DEFAULT_MAX_PAYLOAD, HEADER_SIZE};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
