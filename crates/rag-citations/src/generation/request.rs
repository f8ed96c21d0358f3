//! Request adapter: query + uploads to a chat request

use crate::config::CohereConfig;
use crate::types::chat::{ChatDocument, ChatRequest, Connector};
use crate::types::document::UploadedDocument;

/// A chat request together with the placeholder records built for the uploads
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// Request sent to the API
    pub request: ChatRequest,
    /// `doc_<i>` placeholders for every upload, used for citation lookup
    pub placeholders: Vec<ChatDocument>,
}

/// Builds chat requests from form submissions
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    model: String,
    connectors: Vec<String>,
    ground_on_uploads: bool,
}

impl RequestBuilder {
    /// Create a builder from the chat API configuration
    pub fn new(config: &CohereConfig) -> Self {
        Self {
            model: config.model.clone(),
            connectors: config.connectors.clone(),
            ground_on_uploads: config.ground_on_uploads,
        }
    }

    /// Placeholder records, titled by the synthetic document id
    pub fn placeholders(documents: &[UploadedDocument]) -> Vec<ChatDocument> {
        documents
            .iter()
            .map(|doc| ChatDocument {
                title: doc.id.clone(),
                snippet: doc.text.clone(),
            })
            .collect()
    }

    /// Build the request for a query.
    ///
    /// Placeholders are only attached to the request when grounding on uploads is
    /// enabled; otherwise the model sees the query and connectors alone.
    pub fn build(&self, query: &str, documents: &[UploadedDocument]) -> PreparedRequest {
        let placeholders = Self::placeholders(documents);

        let request = ChatRequest {
            model: self.model.clone(),
            message: query.to_string(),
            connectors: self.connectors.iter().map(Connector::new).collect(),
            documents: if self.ground_on_uploads {
                placeholders.clone()
            } else {
                Vec::new()
            },
        };

        PreparedRequest {
            request,
            placeholders,
        }
    }
}
