//! Response types shown to the user

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A citation resolved back to one of the uploaded documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedCitation {
    /// Cited text span from the answer
    pub text: String,
    /// Identifier returned by the API
    pub document_id: String,
    /// Recovered upload position
    pub document_index: usize,
    /// Filename of the referenced upload
    pub filename: String,
    /// Full text of the referenced upload
    pub source: String,
}

impl ResolvedCitation {
    /// Format citation for display as a list line
    pub fn format_line(&self) -> String {
        format!("- {} (from document: {})", self.text, self.source)
    }
}

/// Answer with citations, as rendered by the page and returned by the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerView {
    /// Generated answer
    pub answer: String,
    /// Citations, in the order the API returned them
    pub citations: Vec<ResolvedCitation>,
    /// Model that produced the answer
    pub model: String,
    /// Number of documents uploaded with the query
    pub documents_uploaded: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Interaction ID for log correlation
    pub interaction_id: Uuid,
}

impl AnswerView {
    /// Create a new answer view
    pub fn new(
        answer: String,
        citations: Vec<ResolvedCitation>,
        model: impl Into<String>,
        documents_uploaded: usize,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            answer,
            citations,
            model: model.into(),
            documents_uploaded,
            processing_time_ms,
            interaction_id: Uuid::new_v4(),
        }
    }

    /// Citation lines in display order
    pub fn citation_lines(&self) -> Vec<String> {
        self.citations.iter().map(ResolvedCitation::format_line).collect()
    }
}

/// Result of one submit
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The submission could not be processed; the message tells the user why
    NeedsInput(String),
    /// The model answered
    Answered(AnswerView),
}
