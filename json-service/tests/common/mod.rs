use json_service::config::{JsonServiceConfig, StoreConfig};
use json_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub directory: PathBuf,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let directory = PathBuf::from(format!("target/test-json-{}", Uuid::new_v4()));

        let config = JsonServiceConfig {
            common: CoreConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port for testing
                ..CoreConfig::default()
            },
            store: StoreConfig {
                directory: directory.clone(),
            },
            debug: false,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, directory }
    }

    pub fn write_document(&self, name: &str, contents: &str) {
        std::fs::write(self.directory.join(name), contents).expect("Failed to write document");
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.directory);
    }
}
