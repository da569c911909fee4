use instagram_service::config::{InstagramConfig, OpenAiConfig, DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL};
use instagram_service::services::providers::mock::MockCompletionProvider;
use instagram_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub fn test_config() -> InstagramConfig {
    InstagramConfig {
        common: CoreConfig { port: 0 },
        openai: OpenAiConfig {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 5,
        },
        environment: "test".to_string(),
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub provider: Arc<MockCompletionProvider>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(provider: MockCompletionProvider) -> Self {
        let provider = Arc::new(provider);

        let app = Application::build_with_provider(test_config(), provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            provider,
            client,
        }
    }

    pub async fn post_identity(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/process-instagram", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }
}
