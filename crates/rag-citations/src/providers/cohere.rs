//! Cohere chat client
//!
//! One POST per call to `{base_url}/v1/chat`. No retry and no backoff: transport
//! and API errors go straight back to the caller.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::{CohereConfig, Credentials};
use crate::error::{Error, Result};
use crate::providers::llm::ChatProvider;
use crate::types::chat::{ChatRequest, ChatResponse};

/// Cohere API client
pub struct CohereClient {
    client: Client,
    base_url: String,
    model: String,
    credentials: Credentials,
}

impl CohereClient {
    /// Create a new Cohere client
    pub fn new(config: &CohereConfig, credentials: Credentials) -> Result<Self> {
        let mut builder = Client::builder().pool_max_idle_per_host(5);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            credentials,
        })
    }

    /// Chat endpoint URL
    fn endpoint(&self) -> String {
        if self.base_url.ends_with("/v1") {
            format!("{}/chat", self.base_url)
        } else {
            format!("{}/v1/chat", self.base_url)
        }
    }
}

#[async_trait]
impl ChatProvider for CohereClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        tracing::info!(
            model = %request.model,
            connectors = request.connectors.len(),
            documents = request.documents.len(),
            "Sending chat request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.credentials.api_key())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!(
                "Cohere chat failed: HTTP {} - {}",
                status, body
            )));
        }

        let body = response.bytes().await?;
        let chat: ChatResponse = serde_json::from_slice(&body)?;

        tracing::debug!(
            response_id = chat.response_id.as_deref().unwrap_or("-"),
            citations = chat.citations.len(),
            "Chat response received"
        );

        Ok(chat)
    }

    fn name(&self) -> &str {
        "cohere"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
