use serde_json::{Map, Value};

use crate::error::Result;

/// Flags forwarded with every distributed call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistributeOptions {
    pub debug: bool,
    pub pretty: bool,
}

/// A loaded dispatcher.
pub trait Dispatcher {
    /// Names of the functions the dispatcher can run, in whatever order it
    /// reports them.
    fn functions(&mut self) -> Result<Vec<String>>;

    /// Run one request and return the collaborator's pre-formatted output.
    ///
    /// `request` is the caller's JSON object, already marked with
    /// `from_cluster`.
    fn distribute(&mut self, request: Map<String, Value>, options: DistributeOptions)
        -> Result<String>;
}
