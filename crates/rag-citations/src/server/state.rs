//! Application state for the form server

use std::sync::Arc;

use crate::config::{Credentials, RagConfig};
use crate::error::{Error, Result};
use crate::generation::RequestBuilder;
use crate::providers::{ChatProvider, CohereClient};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Chat provider; absent when no credential was found
    chat_provider: Option<Arc<dyn ChatProvider>>,
    /// Request builder derived from the chat configuration
    request_builder: RequestBuilder,
}

impl AppState {
    /// Create application state, reading the credential from the environment
    pub fn new(config: RagConfig) -> Result<Self> {
        let credentials = Credentials::from_env(&config.cohere.api_key_env);
        Self::with_credentials(config, credentials)
    }

    /// Create application state from an already-resolved credential
    pub fn with_credentials(config: RagConfig, credentials: Option<Credentials>) -> Result<Self> {
        let chat_provider: Option<Arc<dyn ChatProvider>> = match credentials {
            Some(credentials) => {
                let client = CohereClient::new(&config.cohere, credentials)?;
                tracing::info!(
                    "Cohere client initialized (model: {}, connectors: {:?})",
                    config.cohere.model,
                    config.cohere.connectors
                );
                Some(Arc::new(client))
            }
            None => {
                tracing::error!(
                    "{} environment variable not found; the form will not call the model",
                    config.cohere.api_key_env
                );
                None
            }
        };

        Ok(Self::with_provider(config, chat_provider))
    }

    /// Create application state around an explicit provider
    pub fn with_provider(config: RagConfig, chat_provider: Option<Arc<dyn ChatProvider>>) -> Self {
        let request_builder = RequestBuilder::new(&config.cohere);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                chat_provider,
                request_builder,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the chat provider, if a credential was configured
    pub fn chat_provider(&self) -> Option<&dyn ChatProvider> {
        self.inner.chat_provider.as_deref()
    }

    /// Get the request builder
    pub fn request_builder(&self) -> &RequestBuilder {
        &self.inner.request_builder
    }

    /// Error describing the missing credential, if it is missing
    pub fn credential_error(&self) -> Option<Error> {
        match self.inner.chat_provider {
            Some(_) => None,
            None => Some(Error::MissingCredential(
                self.inner.config.cohere.api_key_env.clone(),
            )),
        }
    }

    /// Whether the form can reach the model
    pub fn is_ready(&self) -> bool {
        self.inner.chat_provider.is_some()
    }
}
