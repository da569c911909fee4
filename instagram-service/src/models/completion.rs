use serde::Serialize;
use serde_json::Value;

/// Marker placed in `error` when the model's text is not valid JSON.
pub const PARSE_FAILURE_MARKER: &str = "Could not parse response as JSON";

/// Outcome of interpreting the model's text.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionResult {
    /// The text parsed as JSON; relayed verbatim.
    Structured(Value),
    /// The text was not JSON; relayed wrapped with a marker.
    Fallback(FallbackResult),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackResult {
    pub error: String,
    pub raw_response: String,
}

impl CompletionResult {
    /// Parse upstream text. Any JSON value is accepted; no shape check.
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => CompletionResult::Structured(value),
            Err(_) => CompletionResult::Fallback(FallbackResult {
                error: PARSE_FAILURE_MARKER.to_string(),
                raw_response: text.to_string(),
            }),
        }
    }
}

impl Serialize for CompletionResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CompletionResult::Structured(value) => value.serialize(serializer),
            CompletionResult::Fallback(fallback) => fallback.serialize(serializer),
        }
    }
}
