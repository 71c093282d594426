//! Client side of the distributed-API dispatcher boundary.
//!
//! The dispatcher itself (routing, clustering, function execution) is an
//! external collaborator. This crate only knows how to reach it: a Unix
//! socket carrying JSON messages in length-prefixed frames, a one-shot
//! hello to confirm it is loaded, and the [`Dispatcher`] trait the CLI
//! programs against.

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod init;
pub mod protocol;

pub use client::SocketDispatcher;
pub use config::{DispatchConfig, DEFAULT_SOCKET_PATH};
pub use dispatcher::{Dispatcher, DistributeOptions};
pub use error::{DispatchError, Result};
pub use init::{load, DispatcherInit, Unavailable, UnavailableKind};
pub use protocol::{DispatchRequest, DispatchResponse, PROTOCOL_VERSION};
