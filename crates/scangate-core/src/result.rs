//! Normalized scan result.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::kind::ScanKind;

/// Key the scanning service uses for its overall verdict.
const IS_VALID_KEY: &str = "is_valid";

/// A scan response, normalized once and handed to the policy gate.
///
/// The raw response is kept verbatim, including fields this client does not
/// understand. `is_valid` is derived from it with a fail-open default: a
/// response with no `is_valid` key at all is treated as valid. Callers using
/// this as a security gate must be aware of that. A present `is_valid` is
/// read by truthiness, so `null`, `0`, `""`, `[]` and `{}` count as invalid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    kind: ScanKind,
    is_valid: bool,
    raw_response: Map<String, Value>,
}

impl ScanResult {
    /// Normalize a response body returned by the scanning service.
    pub fn from_response(kind: ScanKind, raw_response: Map<String, Value>) -> Self {
        let is_valid = raw_response
            .get(IS_VALID_KEY)
            .map(is_truthy)
            .unwrap_or(true);

        Self {
            kind,
            is_valid,
            raw_response,
        }
    }

    pub fn kind(&self) -> ScanKind {
        self.kind
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Full JSON object returned by the service.
    pub fn raw_response(&self) -> &Map<String, Value> {
        &self.raw_response
    }

    /// Scanner-level metadata. Currently the same object as `raw_response`.
    pub fn details(&self) -> &Map<String, Value> {
        &self.raw_response
    }

    pub fn into_raw_response(self) -> Map<String, Value> {
        self.raw_response
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
