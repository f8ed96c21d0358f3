//! Chat provider trait for the hosted model

use async_trait::async_trait;
use crate::error::Result;
use crate::types::chat::{ChatRequest, ChatResponse};

/// Trait for chat-style answer generation
///
/// Implementations:
/// - `CohereClient`: Cohere chat endpoint (command-r)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send one chat request and return the answer with its citations
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
