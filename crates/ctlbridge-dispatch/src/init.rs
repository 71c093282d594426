use std::io::ErrorKind;

use ctlbridge_transport::{inspect, SocketState, TransportError};
use tracing::{debug, warn};

use crate::client::SocketDispatcher;
use crate::config::DispatchConfig;
use crate::error::DispatchError;

/// Why the dispatcher could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableKind {
    /// Nothing is listening where the dispatcher should be.
    Missing,
    /// The dispatcher answered, but refused with a domain fault.
    Fault,
    /// Anything else that went wrong while loading.
    Unexpected,
}

/// A failed load, kept until the main routine decides how to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unavailable {
    pub kind: UnavailableKind,
    pub message: String,
    /// Fault code reported by the dispatcher; only set for
    /// [`UnavailableKind::Fault`].
    pub code: Option<i64>,
}

impl Unavailable {
    pub fn missing(message: impl Into<String>) -> Self {
        Self {
            kind: UnavailableKind::Missing,
            message: message.into(),
            code: None,
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self {
            kind: UnavailableKind::Unexpected,
            message: message.into(),
            code: None,
        }
    }

    pub fn fault(message: impl Into<String>, code: i64) -> Self {
        Self {
            kind: UnavailableKind::Fault,
            message: message.into(),
            code: Some(code),
        }
    }
}

impl From<DispatchError> for Unavailable {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Fault { message, code } => Unavailable::fault(message, code),
            DispatchError::Transport(TransportError::Connect { ref source, .. })
                if matches!(
                    source.kind(),
                    ErrorKind::NotFound | ErrorKind::ConnectionRefused
                ) =>
            {
                Unavailable::missing(err.to_string())
            }
            other => Unavailable::unexpected(other.to_string()),
        }
    }
}

/// Result of loading the dispatcher once at startup.
#[derive(Debug)]
pub enum DispatcherInit<D> {
    Ready(D),
    Unavailable(Unavailable),
}

impl<D> DispatcherInit<D> {
    pub fn is_ready(&self) -> bool {
        matches!(self, DispatcherInit::Ready(_))
    }
}

/// Locate the dispatcher socket, connect, and say hello.
pub fn load(config: &DispatchConfig) -> DispatcherInit<SocketDispatcher> {
    let path = &config.socket_path;
    match inspect(path) {
        Ok(SocketState::Socket) => {}
        Ok(SocketState::Missing) => {
            warn!(?path, "dispatcher socket not found");
            return DispatcherInit::Unavailable(Unavailable::missing(format!(
                "dispatcher socket not found at {}",
                path.display()
            )));
        }
        Ok(SocketState::NotSocket) => {
            warn!(?path, "dispatcher path is not a socket");
            return DispatcherInit::Unavailable(Unavailable::missing(format!(
                "{} is not a unix socket",
                path.display()
            )));
        }
        Err(err) => {
            return DispatcherInit::Unavailable(Unavailable::unexpected(format!(
                "cannot inspect {}: {err}",
                path.display()
            )));
        }
    }

    match SocketDispatcher::connect(config) {
        Ok(dispatcher) => DispatcherInit::Ready(dispatcher),
        Err(err) => {
            debug!(error = %err, "dispatcher load failed");
            DispatcherInit::Unavailable(err.into())
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;
    use std::thread;

    use ctlbridge_frame::{FrameReader, FrameWriter};
    use ctlbridge_transport::UnixDomainSocket;

    use super::*;
    use crate::protocol::DispatchResponse;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ctlb-init-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir
    }

    #[test]
    fn missing_socket_is_missing() {
        let dir = temp_dir("missing");
        let init = load(&DispatchConfig::new(dir.join("absent.sock")));
        match init {
            DispatcherInit::Unavailable(u) => {
                assert_eq!(u.kind, UnavailableKind::Missing);
                assert!(u.message.contains("absent.sock"));
                assert_eq!(u.code, None);
            }
            DispatcherInit::Ready(_) => panic!("nothing should be listening"),
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn regular_file_is_missing() {
        let dir = temp_dir("file");
        let path = dir.join("plain");
        std::fs::write(&path, b"").expect("write");
        let init = load(&DispatchConfig::new(&path));
        assert!(matches!(
            init,
            DispatcherInit::Unavailable(Unavailable {
                kind: UnavailableKind::Missing,
                ..
            })
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn hello_fault_keeps_its_code() {
        let dir = temp_dir("fault");
        let sock = dir.join("dapi.sock");
        let listener = UnixDomainSocket::bind(&sock).expect("bind");
        let server = thread::spawn(move || {
            let stream = listener.accept().expect("accept");
            let mut reader = FrameReader::new(stream.try_clone().expect("clone"));
            let mut writer = FrameWriter::new(stream);
            reader.read_frame().expect("hello");
            let fault = DispatchResponse::Fault {
                message: "Cluster is disabled".into(),
                code: 3013,
            };
            writer
                .send(&serde_json::to_vec(&fault).expect("json"))
                .expect("send");
        });

        let init = load(&DispatchConfig::new(&sock));
        server.join().expect("server");
        match init {
            DispatcherInit::Unavailable(u) => {
                assert_eq!(u, Unavailable::fault("Cluster is disabled", 3013));
            }
            DispatcherInit::Ready(_) => panic!("fault should not load"),
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn garbage_hello_reply_is_unexpected() {
        let dir = temp_dir("garbage");
        let sock = dir.join("dapi.sock");
        let listener = UnixDomainSocket::bind(&sock).expect("bind");
        let server = thread::spawn(move || {
            let stream = listener.accept().expect("accept");
            let mut reader = FrameReader::new(stream.try_clone().expect("clone"));
            let mut writer = FrameWriter::new(stream);
            reader.read_frame().expect("hello");
            writer.send(b"not json").expect("send");
        });

        let init = load(&DispatchConfig::new(&sock));
        server.join().expect("server");
        assert!(matches!(
            init,
            DispatcherInit::Unavailable(Unavailable {
                kind: UnavailableKind::Unexpected,
                ..
            })
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn refused_connection_maps_to_missing() {
        let err = DispatchError::Transport(TransportError::Connect {
            path: PathBuf::from("/tmp/x.sock"),
            source: std::io::Error::from(ErrorKind::ConnectionRefused),
        });
        assert_eq!(Unavailable::from(err).kind, UnavailableKind::Missing);
    }
}
