//! One submit: validate, call the chat API once, resolve citations

use std::time::Instant;

use crate::error::{Error, Result};
use crate::providers::ChatProvider;
use crate::types::document::{Upload, UploadedDocument};
use crate::types::response::{AnswerView, Outcome};

use super::citation::resolve_citations;
use super::request::RequestBuilder;

pub const ENTER_QUERY_MESSAGE: &str = "Please enter a query to proceed.";
pub const UPLOAD_DOCUMENT_MESSAGE: &str = "Please upload at least one document to proceed.";

/// Run one interaction.
///
/// `chat` is `None` when no credential was found; `credential_var` names the
/// variable for the message shown in that case. Each early return happens
/// before any remote call.
pub async fn answer_submission(
    chat: Option<&dyn ChatProvider>,
    credential_var: &str,
    builder: &RequestBuilder,
    query: &str,
    uploads: Vec<Upload>,
) -> Result<Outcome> {
    let Some(chat) = chat else {
        return Ok(Outcome::NeedsInput(
            Error::MissingCredential(credential_var.to_string()).to_string(),
        ));
    };

    if query.is_empty() {
        return Ok(Outcome::NeedsInput(ENTER_QUERY_MESSAGE.to_string()));
    }
    if uploads.is_empty() {
        return Ok(Outcome::NeedsInput(UPLOAD_DOCUMENT_MESSAGE.to_string()));
    }

    let start = Instant::now();
    let documents = UploadedDocument::from_uploads(uploads)?;

    tracing::info!(
        provider = chat.name(),
        model = chat.model(),
        documents = documents.len(),
        "Query: \"{}\"",
        query
    );

    let prepared = builder.build(query, &documents);
    let response = chat.chat(&prepared.request).await?;
    let citations = resolve_citations(&response.citations, &documents)?;

    let processing_time_ms = start.elapsed().as_millis() as u64;
    let view = AnswerView::new(
        response.text,
        citations,
        chat.model(),
        documents.len(),
        processing_time_ms,
    );

    tracing::info!(
        interaction_id = %view.interaction_id,
        "Query completed in {}ms, {} citations",
        processing_time_ms,
        view.citations.len()
    );

    Ok(Outcome::Answered(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CohereConfig;
    use crate::types::chat::{ChatCitation, ChatRequest, ChatResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubChat {
        response: ChatResponse,
        calls: AtomicUsize,
        last_request: Mutex<Option<ChatRequest>>,
    }

    impl StubChat {
        fn new(text: &str, citations: Vec<ChatCitation>) -> Self {
            Self {
                response: ChatResponse {
                    text: text.to_string(),
                    citations,
                    response_id: None,
                },
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ChatProvider for StubChat {
        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            Ok(self.response.clone())
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "command-r"
        }
    }

    fn uploads() -> Vec<Upload> {
        vec![
            Upload::new("sky.txt", "The sky is blue."),
            Upload::new("grass.txt", "Grass is green."),
        ]
    }

    fn builder() -> RequestBuilder {
        RequestBuilder::new(&CohereConfig::default())
    }

    fn needs_input(outcome: Outcome) -> String {
        match outcome {
            Outcome::NeedsInput(message) => message,
            Outcome::Answered(view) => panic!("unexpected answer: {}", view.answer),
        }
    }

    #[test]
    fn test_missing_credential() {
        let outcome = tokio_test::block_on(answer_submission(
            None,
            "COHERE_API_KEY",
            &builder(),
            "question",
            uploads(),
        ))
        .unwrap();

        assert_eq!(
            needs_input(outcome),
            "COHERE_API_KEY environment variable not found. Please set it."
        );
    }

    #[test]
    fn test_empty_query_makes_no_call() {
        let stub = StubChat::new("unused", Vec::new());
        let outcome = tokio_test::block_on(answer_submission(
            Some(&stub),
            "COHERE_API_KEY",
            &builder(),
            "",
            uploads(),
        ))
        .unwrap();

        assert_eq!(needs_input(outcome), ENTER_QUERY_MESSAGE);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_uploads_makes_no_call() {
        let stub = StubChat::new("unused", Vec::new());
        let outcome = tokio_test::block_on(answer_submission(
            Some(&stub),
            "COHERE_API_KEY",
            &builder(),
            "What colour is grass?",
            Vec::new(),
        ))
        .unwrap();

        assert_eq!(needs_input(outcome), UPLOAD_DOCUMENT_MESSAGE);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_answer_with_citation() {
        let stub = StubChat::new(
            "Grass is green.",
            vec![ChatCitation {
                start: 0,
                end: 15,
                text: "Grass is green.".to_string(),
                document_ids: vec!["doc_1".to_string()],
            }],
        );

        let outcome = tokio_test::block_on(answer_submission(
            Some(&stub),
            "COHERE_API_KEY",
            &builder(),
            "What colour is grass?",
            uploads(),
        ))
        .unwrap();

        let view = match outcome {
            Outcome::Answered(view) => view,
            Outcome::NeedsInput(message) => panic!("unexpected message: {}", message),
        };

        assert_eq!(view.answer, "Grass is green.");
        assert_eq!(view.documents_uploaded, 2);
        assert_eq!(view.citations[0].source, "Grass is green.");
        assert_eq!(view.citations[0].filename, "grass.txt");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);

        let request = stub.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.message, "What colour is grass?");
        assert!(request.documents.is_empty());
    }

    #[test]
    fn test_undecodable_upload_makes_no_call() {
        let stub = StubChat::new("unused", Vec::new());
        let err = tokio_test::block_on(answer_submission(
            Some(&stub),
            "COHERE_API_KEY",
            &builder(),
            "q",
            vec![Upload::new("bad.txt", vec![0xc3, 0x28])],
        ))
        .unwrap_err();

        assert!(matches!(err, Error::FileParse { .. }));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_bad_citation_fails_interaction() {
        let stub = StubChat::new(
            "answer",
            vec![ChatCitation {
                start: 0,
                end: 6,
                text: "answer".to_string(),
                document_ids: vec!["doc_5".to_string()],
            }],
        );

        let err = tokio_test::block_on(answer_submission(
            Some(&stub),
            "COHERE_API_KEY",
            &builder(),
            "q",
            uploads(),
        ))
        .unwrap_err();

        assert!(matches!(err, Error::Citation(_)));
    }
}
