//! rag-citations: single-page document Q&A with source citations
//!
//! A user uploads text files and types a query. The query goes to a hosted chat
//! model (Cohere `command-r` with the web-search connector), and every citation in
//! the reply is mapped back to an upload through its `doc_<i>` identifier.
//! Grounding and citation generation happen remotely; this crate only collects
//! input, makes one API call per submit, and renders the result.

pub mod config;
pub mod error;
pub mod generation;
pub mod providers;
pub mod server;
pub mod types;
pub mod ui;

pub use config::{Credentials, RagConfig};
pub use error::{Error, Result};
pub use types::{
    chat::{ChatCitation, ChatRequest, ChatResponse},
    document::{document_id, parse_document_index, UploadedDocument},
    response::{AnswerView, Outcome, ResolvedCitation},
};
