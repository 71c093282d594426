use std::io;
use std::os::unix::fs::{FileTypeExt, MetadataExt, PermissionsExt};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::traits::IpcStream;

/// `sockaddr_un.sun_path` capacity.
#[cfg(target_os = "linux")]
const MAX_PATH_LEN: usize = 108;
#[cfg(not(target_os = "linux"))]
const MAX_PATH_LEN: usize = 104;

/// What currently sits at a socket path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketState {
    /// Nothing exists at the path.
    Missing,
    /// Something exists, but it is not a Unix socket.
    NotSocket,
    /// A Unix socket file exists (a listener may or may not be behind it).
    Socket,
}

/// Inspect `path` without connecting.
pub fn inspect(path: impl AsRef<Path>) -> io::Result<SocketState> {
    match std::fs::symlink_metadata(path.as_ref()) {
        Ok(meta) if meta.file_type().is_socket() => Ok(SocketState::Socket),
        Ok(_) => Ok(SocketState::NotSocket),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(SocketState::Missing),
        Err(err) => Err(err),
    }
}

fn check_path_len(path: &Path) -> Result<()> {
    let len = path.as_os_str().len();
    if len >= MAX_PATH_LEN {
        return Err(TransportError::PathTooLong {
            path: path.to_path_buf(),
            len,
            max: MAX_PATH_LEN,
        });
    }
    Ok(())
}

/// Filesystem-path Unix domain socket.
///
/// `connect` is the client entry point used by both binaries. `bind` and
/// `accept` exist for local peers (fake daemons in tests, diagnostics).
pub struct UnixDomainSocket {
    listener: UnixListener,
    path: PathBuf,
    inode: (u64, u64),
}

impl UnixDomainSocket {
    /// Permission mode applied to sockets created by [`bind`](Self::bind).
    pub const DEFAULT_SOCKET_MODE: u32 = 0o660;

    /// Bind and listen on `path`, replacing a stale socket file if present.
    pub fn bind(path: impl AsRef<Path>) -> Result<Self> {
        Self::bind_with_mode(path, Self::DEFAULT_SOCKET_MODE)
    }

    /// Bind and listen on `path` with an explicit permission mode.
    pub fn bind_with_mode(path: impl AsRef<Path>, mode: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        check_path_len(&path)?;

        let bind_err = |source: io::Error| TransportError::Bind {
            path: path.clone(),
            source,
        };

        // Never unlink anything that is not a socket.
        match inspect(&path).map_err(bind_err)? {
            SocketState::Missing => {}
            SocketState::Socket => {
                debug!(?path, "removing stale socket");
                std::fs::remove_file(&path).map_err(bind_err)?;
            }
            SocketState::NotSocket => {
                return Err(bind_err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "existing path is not a unix socket",
                )));
            }
        }

        let listener = UnixListener::bind(&path).map_err(bind_err)?;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))
            .map_err(bind_err)?;
        let meta = std::fs::symlink_metadata(&path).map_err(bind_err)?;

        info!(?path, "listening on unix domain socket");
        Ok(Self {
            listener,
            path,
            inode: (meta.dev(), meta.ino()),
        })
    }

    /// Accept an incoming connection (blocking).
    pub fn accept(&self) -> Result<IpcStream> {
        let (stream, _addr) = self.listener.accept().map_err(TransportError::Accept)?;
        debug!(path = ?self.path, "accepted connection");
        Ok(IpcStream::from_unix(stream))
    }

    /// Connect to a listening socket (blocking, no timeout).
    pub fn connect(path: impl AsRef<Path>) -> Result<IpcStream> {
        let path = path.as_ref();
        check_path_len(path)?;
        let stream = UnixStream::connect(path).map_err(|source| TransportError::Connect {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(?path, "connected to unix domain socket");
        Ok(IpcStream::from_unix(stream))
    }
}

impl Drop for UnixDomainSocket {
    fn drop(&mut self) {
        // Only unlink the file we created; someone may have rebound the path.
        let Ok(meta) = std::fs::symlink_metadata(&self.path) else {
            return;
        };
        if meta.file_type().is_socket() && (meta.dev(), meta.ino()) == self.inode {
            debug!(path = ?self.path, "cleaning up socket file");
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
