//! Core types

pub mod chat;
pub mod document;
pub mod response;

pub use chat::{ChatCitation, ChatDocument, ChatRequest, ChatResponse, Connector};
pub use document::{document_id, parse_document_index, Upload, UploadedDocument};
pub use response::{AnswerView, Outcome, ResolvedCitation};
