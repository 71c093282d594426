use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version exchanged in the hello.
pub const PROTOCOL_VERSION: u32 = 1;

/// Messages sent to the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DispatchRequest {
    Hello {
        version: u32,
    },
    ListFunctions,
    Distribute {
        input_json: Value,
        debug: bool,
        pretty: bool,
    },
}

/// Messages received from the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DispatchResponse {
    Ready {
        version: u32,
    },
    Functions {
        functions: Vec<String>,
    },
    /// Pre-formatted output, printed by the CLI as-is.
    #[serde(rename = "result")]
    Data {
        data: String,
    },
    Fault {
        message: String,
        code: i64,
    },
    Error {
        message: String,
    },
}

impl DispatchResponse {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            DispatchResponse::Ready { .. } => "ready",
            DispatchResponse::Functions { .. } => "functions",
            DispatchResponse::Data { .. } => "result",
            DispatchResponse::Fault { .. } => "fault",
            DispatchResponse::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requests_are_tagged_by_type() {
        let hello = serde_json::to_value(DispatchRequest::Hello { version: 1 }).unwrap();
        assert_eq!(hello, json!({"type": "hello", "version": 1}));

        let list = serde_json::to_value(DispatchRequest::ListFunctions).unwrap();
        assert_eq!(list, json!({"type": "list_functions"}));

        let call = serde_json::to_value(DispatchRequest::Distribute {
            input_json: json!({"function": "/cluster/node", "from_cluster": false}),
            debug: false,
            pretty: true,
        })
        .unwrap();
        assert_eq!(call["type"], "distribute");
        assert_eq!(call["input_json"]["function"], "/cluster/node");
        assert_eq!(call["pretty"], true);
    }

    #[test]
    fn result_variant_uses_wire_name() {
        let parsed: DispatchResponse =
            serde_json::from_str(r#"{"type":"result","data":"{\"error\":0}"}"#).unwrap();
        assert_eq!(
            parsed,
            DispatchResponse::Data {
                data: "{\"error\":0}".to_string()
            }
        );
        assert_eq!(parsed.kind(), "result");
    }

    #[test]
    fn fault_carries_code() {
        let parsed: DispatchResponse =
            serde_json::from_str(r#"{"type":"fault","message":"Cluster is not running","code":3013}"#)
                .unwrap();
        assert!(matches!(parsed, DispatchResponse::Fault { code: 3013, .. }));
    }
}
