//! `POST /api/process-instagram`: validate, prompt, relay.

use crate::models::{CompletionResult, IdentityRequest, REQUIRED_FIELDS};
use crate::services::prompt::{render_identity_prompt, MAX_TOKENS, SYSTEM_INSTRUCTION, TEMPERATURE};
use crate::services::providers::{ChatMessage, CompletionRequest};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::{Map, Value};
use service_core::error::AppError;
use service_core::middleware::{next_request_id, RequestId};

/// Characters of the model output included in the preview log line.
const RESPONSE_PREVIEW_CHARS: usize = 200;

pub async fn process_instagram(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let request_id = request_id
        .map(|Extension(id)| id)
        .unwrap_or_else(next_request_id);

    tracing::info!(request_id = %request_id, "Processing identity request");

    let body = body.map_err(|rejection| {
        tracing::error!(
            request_id = %request_id,
            status = %rejection.status(),
            error = %rejection.body_text(),
            "Failed to read request body"
        );
        AppError::InternalError(anyhow::anyhow!(
            "Failed to read request body: {}",
            rejection.body_text()
        ))
    })?;

    let body = parse_body(&headers, &body).map_err(|e| {
        tracing::error!(request_id = %request_id, error = %e, "Request body is not valid JSON");
        e
    })?;

    tracing::info!(request_id = %request_id, body = %body, "Request body received");

    let identity = IdentityRequest::from_body(&body).map_err(|presence| {
        tracing::warn!(
            request_id = %request_id,
            nombre_usuario_deseado = presence.nombre_usuario_deseado,
            solicitud_biografia = presence.solicitud_biografia,
            publico_objetivo = presence.publico_objetivo,
            "Validation failed: missing required fields"
        );
        AppError::MissingFields(REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect())
    })?;

    tracing::info!(request_id = %request_id, "Validation passed");

    let prompt = render_identity_prompt(&identity);
    let completion_request = CompletionRequest {
        messages: vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(prompt),
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    };

    tracing::info!(
        request_id = %request_id,
        model = %state.provider.model(),
        temperature = TEMPERATURE,
        max_tokens = MAX_TOKENS,
        prompt_len = completion_request.messages[1].content.len(),
        "Prompt prepared, calling completion provider"
    );

    let completion = state
        .provider
        .complete(&completion_request)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Completion call failed");
            AppError::Upstream(e.to_string())
        })?;

    match completion.usage {
        Some(usage) => tracing::info!(
            request_id = %request_id,
            model = %completion.model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            finish_reason = completion.finish_reason.as_deref().unwrap_or("-"),
            "Completion received"
        ),
        None => tracing::info!(
            request_id = %request_id,
            model = %completion.model,
            "Completion received without usage data"
        ),
    }

    tracing::info!(
        request_id = %request_id,
        preview = %preview(&completion.text),
        "Raw completion text"
    );

    let result = CompletionResult::from_text(&completion.text);
    match &result {
        CompletionResult::Structured(_) => {
            tracing::info!(request_id = %request_id, "Completion parsed as JSON")
        }
        CompletionResult::Fallback(fallback) => tracing::warn!(
            request_id = %request_id,
            raw_response = %fallback.raw_response,
            "Completion is not valid JSON, returning raw text"
        ),
    }

    Ok(Json(result).into_response())
}

/// Bodies without a JSON content type, or with no bytes at all, are treated
/// as an empty object so they fail validation rather than parsing. JSON
/// bodies must be an object or array at the top level.
fn parse_body(headers: &HeaderMap, body: &Bytes) -> Result<Value, AppError> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false);

    if !is_json || body.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Invalid JSON body: {}", e)))?;

    if !(value.is_object() || value.is_array()) {
        return Err(AppError::InternalError(anyhow::anyhow!(
            "Invalid JSON body: top-level value must be an object or array"
        )));
    }

    Ok(value)
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(RESPONSE_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
