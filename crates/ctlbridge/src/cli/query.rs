//! `ctlbridge-query`: push one query onto the database daemon's socket.

use std::path::Path;

use clap::Parser;
use ctlbridge_frame::{FrameConfig, FrameWriter};
use ctlbridge_transport::UnixDomainSocket;
use tracing::debug;

use crate::cli::exit::{frame_error, transport_error, CliResult, SUCCESS};

/// Queue socket of the database daemon.
pub const QUERY_SOCKET_PATH: &str = "/var/ossec/queue/db/wdb";

#[derive(Parser, Debug)]
#[command(
    name = "ctlbridge-query",
    version,
    about = "Tool for sending queries to the database daemon"
)]
pub struct QueryArgs {
    /// Query to send to the database daemon.
    #[arg(short, long)]
    pub query: String,
}

pub fn run(args: QueryArgs) -> CliResult<i32> {
    send_query(QUERY_SOCKET_PATH, &args.query)?;
    Ok(SUCCESS)
}

/// Connect, write one length-prefixed frame, and hang up. Nothing is read
/// back.
pub fn send_query(path: impl AsRef<Path>, query: &str) -> CliResult<()> {
    let path = path.as_ref();
    let stream =
        UnixDomainSocket::connect(path).map_err(|err| transport_error("connect failed", err))?;
    let mut writer = FrameWriter::with_config(stream, FrameConfig::unbounded());
    writer
        .send(query.as_bytes())
        .map_err(|err| frame_error("send failed", err))?;
    debug!(?path, bytes = query.len(), "query sent");
    Ok(())
}
