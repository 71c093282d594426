/// Errors that can occur while encoding or decoding frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the stream before a complete frame arrived.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
