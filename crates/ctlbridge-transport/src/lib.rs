//! Blocking Unix domain socket transport.
//!
//! Both ctlbridge sockets (the dispatcher control socket and the database
//! queue socket) are filesystem-path stream sockets. This crate is the lowest
//! layer: connect, bind/accept for local peers, and the [`IpcStream`] handle
//! everything else reads and writes through.

pub mod error;
pub mod traits;

#[cfg(unix)]
pub mod uds;

pub use error::{Result, TransportError};
pub use traits::IpcStream;

#[cfg(unix)]
pub use uds::{inspect, SocketState, UnixDomainSocket};
