use std::time::Duration;

/// Errors raised while talking to the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Socket-level failure (connect, path, I/O).
    #[error("transport error: {0}")]
    Transport(#[from] ctlbridge_transport::TransportError),

    /// Framing failure on the dispatcher socket.
    #[error("frame error: {0}")]
    Frame(#[from] ctlbridge_frame::FrameError),

    /// A message could not be encoded or decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Domain-specific fault reported by the dispatcher, with its own code.
    #[error("{message}")]
    Fault { message: String, code: i64 },

    /// The dispatcher failed in a way it did not classify.
    #[error("{0}")]
    Remote(String),

    /// The dispatcher answered with a message that makes no sense here.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// No answer within the configured timeout.
    #[error("dispatcher did not answer within {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
