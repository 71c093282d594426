//! The `{error, data|message}` document printed by `ctlbridge-request`.

use std::io::Write;

use ctlbridge_dispatch::{Unavailable, UnavailableKind};
use serde::Serialize;
use serde_json::Value;

/// Error code used for every failure the CLI itself detects.
pub const INTERNAL_ERROR_CODE: i64 = 1000;

const INTERNAL_ERROR_PREFIX: &str = "ctlbridge Internal Error";

/// Response envelope. `error == 0` carries `data`, anything else `message`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub error: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn success(data: impl Into<Value>) -> Self {
        Self {
            error: 0,
            data: Some(data.into()),
            message: None,
        }
    }

    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            error: code,
            data: None,
            message: Some(message.into()),
        }
    }

    /// A failure detected by the CLI, always code 1000.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        Self::failure(
            INTERNAL_ERROR_CODE,
            format!("{INTERNAL_ERROR_PREFIX}: {detail}"),
        )
    }

    pub fn bad_json() -> Self {
        Self::internal("Bad JSON input")
    }

    pub fn missing_function() -> Self {
        Self::internal("'JSON input' must have the 'function' key")
    }

    /// Report a dispatcher that never loaded.
    pub fn unavailable(unavailable: &Unavailable) -> Self {
        match (unavailable.kind, unavailable.code) {
            (UnavailableKind::Fault, Some(code)) => Self::failure(code, &unavailable.message),
            (UnavailableKind::Unexpected, _) => {
                Self::internal(format_args!("uncaught exception: {}", unavailable.message))
            }
            _ => Self::internal(&unavailable.message),
        }
    }

    /// Serialize compactly, or indented by four spaces when `pretty`.
    pub fn render(&self, pretty: bool) -> serde_json::Result<String> {
        if !pretty {
            return serde_json::to_string(self);
        }
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever writes valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the rendered document plus a trailing newline.
    pub fn write_to(&self, out: &mut impl Write, pretty: bool) -> std::io::Result<()> {
        let rendered = self.render(pretty).map_err(std::io::Error::other)?;
        writeln!(out, "{rendered}")?;
        out.flush()
    }
}
