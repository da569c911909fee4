//! Inbound identity request and the suggestion shape the prompt asks for.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FIELD_DESIRED_USERNAME: &str = "nombre_usuario_deseado";
pub const FIELD_BIO_INTENT: &str = "solicitud_biografia";
pub const FIELD_TARGET_AUDIENCE: &str = "publico_objetivo";

/// Canonical order of the required fields, as reported in 400 responses.
pub const REQUIRED_FIELDS: [&str; 3] = [
    FIELD_DESIRED_USERNAME,
    FIELD_BIO_INTENT,
    FIELD_TARGET_AUDIENCE,
];

/// Validated request: every field present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRequest {
    pub desired_username: String,
    pub bio_intent: String,
    pub target_audience: String,
}

/// Which of the required fields were usable, for the validation log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldPresence {
    pub nombre_usuario_deseado: bool,
    pub solicitud_biografia: bool,
    pub publico_objetivo: bool,
}

impl IdentityRequest {
    /// Extract the three fields from an arbitrary JSON body.
    ///
    /// A field counts as missing when it is absent, `null`, `false`, `0` or
    /// an empty string. Anything else is accepted and rendered as text.
    pub fn from_body(body: &Value) -> Result<Self, FieldPresence> {
        let username = field_text(body, FIELD_DESIRED_USERNAME);
        let bio = field_text(body, FIELD_BIO_INTENT);
        let audience = field_text(body, FIELD_TARGET_AUDIENCE);

        match (username, bio, audience) {
            (Some(desired_username), Some(bio_intent), Some(target_audience)) => Ok(Self {
                desired_username,
                bio_intent,
                target_audience,
            }),
            (username, bio, audience) => Err(FieldPresence {
                nombre_usuario_deseado: username.is_some(),
                solicitud_biografia: bio.is_some(),
                publico_objetivo: audience.is_some(),
            }),
        }
    }
}

fn field_text(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// The structured answer requested from the model.
///
/// Responses are relayed as raw JSON without being checked against this
/// type; it exists for the mock provider and for callers that want a typed
/// view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySuggestion {
    pub sugerencias_usuario: Vec<String>,
    pub biografias: Vec<String>,
    pub publico_objetivo: String,
    pub recomendaciones_comunidad: Vec<String>,
}
