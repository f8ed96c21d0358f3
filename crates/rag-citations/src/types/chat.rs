//! Chat request/response types for the hosted model API

use serde::{Deserialize, Serialize};

/// Connector specification (e.g. `{"id": "web-search"}`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Connector {
    pub id: String,
}

impl Connector {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Document record in the shape the chat API expects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatDocument {
    pub title: String,
    pub snippet: String,
}

/// Chat request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// User message
    pub message: String,
    /// Connectors the model may pull context from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connectors: Vec<Connector>,
    /// Documents to ground on (omitted unless explicitly attached)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<ChatDocument>,
}

/// Citation record returned by the chat API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCitation {
    /// Start offset of the cited span in the answer
    #[serde(default)]
    pub start: usize,
    /// End offset of the cited span in the answer
    #[serde(default)]
    pub end: usize,
    /// Cited text
    pub text: String,
    /// Referenced document identifiers
    #[serde(default)]
    pub document_ids: Vec<String>,
}

/// Chat response body (fields this application reads)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    /// Answer text
    pub text: String,
    /// Citations; `null` or missing means none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub citations: Vec<ChatCitation>,
    /// Response id assigned by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<ChatCitation>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<ChatCitation>>::deserialize(deserializer)?.unwrap_or_default())
}
