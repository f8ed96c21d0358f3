//! Provider abstraction for the hosted chat model
//!
//! The trait lets the form run against Cohere in production and a stub in tests.

pub mod cohere;
pub mod llm;

pub use cohere::CohereClient;
pub use llm::ChatProvider;
