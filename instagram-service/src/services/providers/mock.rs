//! Mock provider implementation for testing.

use super::{Completion, CompletionProvider, CompletionRequest, ProviderError, TokenUsage};
use crate::models::IdentitySuggestion;
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text as the first choice.
    Text(String),
    /// Fail the call as if the upstream API errored.
    ApiError(String),
    /// Fail the call as if the network was down.
    NetworkError(String),
}

/// Mock completion provider that records every request it receives.
pub struct MockCompletionProvider {
    reply: MockReply,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reply with the given text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    /// Reply with a well-formed suggestion object.
    pub fn with_suggestion() -> Self {
        let text = serde_json::to_string(&sample_suggestion()).unwrap_or_default();
        Self::with_text(text)
    }

    /// Requests seen so far, oldest first.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }

        match &self.reply {
            MockReply::Text(text) => {
                let prompt_tokens: u32 = request
                    .messages
                    .iter()
                    .map(|m| m.content.len() as u32 / 4)
                    .sum();
                let completion_tokens = text.len() as u32 / 4;

                Ok(Completion {
                    text: text.clone(),
                    model: self.model().to_string(),
                    usage: Some(TokenUsage {
                        prompt_tokens,
                        completion_tokens,
                        total_tokens: prompt_tokens + completion_tokens,
                    }),
                    finish_reason: Some("stop".to_string()),
                })
            }
            MockReply::ApiError(msg) => Err(ProviderError::ApiError(msg.clone())),
            MockReply::NetworkError(msg) => Err(ProviderError::NetworkError(msg.clone())),
        }
    }
}

/// A suggestion with the exact cardinalities the prompt asks for.
pub fn sample_suggestion() -> IdentitySuggestion {
    IdentitySuggestion {
        sugerencias_usuario: vec![
            "chef.ana.saludable".to_string(),
            "ana_cocina_viva".to_string(),
            "lacocinadeana".to_string(),
            "ana.nutre".to_string(),
            "chefana_bienestar".to_string(),
        ],
        biografias: vec![
            "Cocina saludable con pasión 🥗 | Recetas fáciles para tu bienestar".to_string(),
            "Chef y amante de lo natural 🌿 Te enseño a comer rico y sano".to_string(),
        ],
        publico_objetivo:
            "Mujeres de 25 a 40 años interesadas en bienestar, nutrición y recetas prácticas."
                .to_string(),
        recomendaciones_comunidad: vec![
            "Respondé comentarios con preguntas sobre sus hábitos.".to_string(),
            "Usá historias con encuestas para elegir la próxima receta.".to_string(),
            "Creá un hashtag propio para que compartan sus platos.".to_string(),
        ],
    }
}
