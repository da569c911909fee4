//! Application startup and lifecycle management.

use crate::config::InstagramConfig;
use crate::handlers;
use crate::services::providers::openai::{OpenAiProvider, OpenAiProviderConfig};
use crate::services::providers::CompletionProvider;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{access_log_middleware, panic_response, request_id_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: InstagramConfig,
    pub provider: Arc<dyn CompletionProvider>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: InstagramConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            config,
            provider,
            started_at: Instant::now(),
        }
    }
}

/// Build the OpenAI-backed provider from configuration.
pub fn build_provider(config: &InstagramConfig) -> Result<Arc<dyn CompletionProvider>, AppError> {
    if config.openai.api_key.is_none() {
        tracing::warn!(
            "OPENAI_API_KEY is not configured; /api/process-instagram will fail until it is set"
        );
    } else {
        tracing::info!("OpenAI API key configured");
    }

    let provider = OpenAiProvider::new(OpenAiProviderConfig {
        api_key: config.openai.api_key.clone(),
        base_url: config.openai.base_url.clone(),
        model: config.openai.model.clone(),
        timeout: Duration::from_secs(config.openai.timeout_secs),
    })
    .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

    tracing::info!(
        model = %config.openai.model,
        base_url = %config.openai.base_url,
        timeout_secs = config.openai.timeout_secs,
        "Initialized OpenAI completion provider"
    );

    Ok(Arc::new(provider))
}

/// Largest request body accepted before the handler answers with a 500.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))
        .route("/api/process-instagram", post(handlers::process_instagram))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn(access_log_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the real upstream provider.
    pub async fn build(config: InstagramConfig) -> Result<Self, AppError> {
        let provider = build_provider(&config)?;
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: InstagramConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            environment = %config.environment,
            health_check = "/health",
            endpoint = "/api/process-instagram",
            "Instagram service listening"
        );

        let router = build_router(AppState::new(config, provider));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run until the process is stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_shutdown(std::future::pending()).await
    }

    /// Run until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_with_shutdown<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(
            self.listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
