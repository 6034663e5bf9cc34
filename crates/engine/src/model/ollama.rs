// crates/engine/src/model/ollama.rs
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ModelBackend, ModelError};
use crate::config::Config;

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    model: &'a str,
    format: &'static str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions<'a>,
}

#[derive(Serialize, Debug)]
struct GenerateOptions<'a> {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<&'a str>>,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Ollama `/api/generate` client constrained to JSON output.
#[derive(Debug, Clone)]
pub struct OllamaModel {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    stop: Option<String>,
}

impl OllamaModel {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            temperature: 0.0,
            stop: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ModelError::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            stop: config.stop.clone(),
        })
    }

    pub fn with_stop(mut self, stop: impl Into<String>) -> Self {
        self.stop = Some(stop.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/api/generate", self.endpoint.trim_end_matches('/'))
    }
}

impl ModelBackend for OllamaModel {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, ModelError> {
        let request = GenerateRequest {
            model: &self.model,
            format: "json",
            system,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                stop: self.stop.as_deref().map(|stop| vec![stop]),
            },
        };

        info!(model = %self.model, "Invoking model");
        debug!(?request, "Generate payload");

        let response = self
            .client
            .post(self.url())
            .json(&request)
            .send()
            .await
            .map_err(|source| ModelError::Request {
                model: self.model.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ModelError::Request {
            model: self.model.clone(),
            source,
        })?;

        let parsed: GenerateResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => return Err(ModelError::Status(status)),
            Err(e) => return Err(ModelError::InvalidResponse(e.to_string())),
        };

        if let Some(error) = parsed.error {
            return Err(ModelError::Backend(error));
        }
        if !status.is_success() {
            return Err(ModelError::Status(status));
        }

        let text = parsed
            .response
            .ok_or_else(|| ModelError::InvalidResponse("missing 'response' field".to_string()))?;
        debug!(response = %text, "Response from Ollama model");

        Ok(text)
    }
}
