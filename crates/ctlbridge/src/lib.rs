//! Cluster control bridge.
//!
//! Two small operator tools sit on top of three layers:
//!
//! - [`transport`]: blocking Unix domain socket transport
//! - [`frame`]: u32 little-endian length-prefixed framing
//! - [`dispatch`]: client for the external distributed-API dispatcher
//! - [`cli`]: the `ctlbridge-request` and `ctlbridge-query` front ends
//!   (behind the `cli` feature, on by default)

/// Re-export transport types.
pub mod transport {
    pub use ctlbridge_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use ctlbridge_frame::*;
}

/// Re-export dispatcher client types.
pub mod dispatch {
    pub use ctlbridge_dispatch::*;
}

#[cfg(feature = "cli")]
pub mod cli;
