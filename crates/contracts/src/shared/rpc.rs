//! Wire types of the message-pattern transport.
//!
//! Совместимо с TCP-транспортом NestJS: запрос `{pattern, data, id}`,
//! ответ `{id, response | err, isDisposed}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// `"<slug>.<op>"` or `{"cmd": "<slug>.<op>"}`
    pub pattern: Value,
    #[serde(default)]
    pub data: Value,
    /// Absent for fire-and-forget events
    #[serde(default)]
    pub id: Option<String>,
}

impl RpcRequest {
    /// Pattern name, whether sent as a plain string or as `{cmd}`
    pub fn pattern_name(&self) -> Option<&str> {
        match &self.pattern {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("cmd").and_then(Value::as_str),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<Value>,
    pub is_disposed: bool,
}

impl RpcResponse {
    pub fn ok(id: String, response: Value) -> Self {
        Self {
            id,
            response: Some(response),
            err: None,
            is_disposed: true,
        }
    }

    pub fn err(id: String, err: Value) -> Self {
        Self {
            id,
            response: None,
            err: Some(err),
            is_disposed: true,
        }
    }
}
