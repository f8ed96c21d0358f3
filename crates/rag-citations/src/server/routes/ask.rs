//! The form page: render and submit

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
};

use crate::generation::answer_submission;
use crate::server::state::AppState;
use crate::ui::{Page, Submission};

/// GET / - Render the empty form
pub async fn show_form(State(state): State<AppState>) -> Html<String> {
    let page = Page::new(&state.config().ui)
        .with_credential_error(state.credential_error().map(|e| e.to_string()));
    Html(page.render())
}

/// POST / - Run one interaction and render the result below the form
pub async fn submit_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let ui = &state.config().ui;
    let page = Page::new(ui).with_credential_error(state.credential_error().map(|e| e.to_string()));

    let submission = match Submission::from_multipart(multipart, ui).await {
        Ok(submission) => submission,
        Err(e) => {
            tracing::warn!("Rejected form submission: {}", e);
            let status = e.status_and_type().0;
            return (status, Html(page.with_error(e.to_string()).render()));
        }
    };

    let page = page.with_query(submission.query.clone());

    let result = answer_submission(
        state.chat_provider(),
        &state.config().cohere.api_key_env,
        state.request_builder(),
        &submission.query,
        submission.uploads,
    )
    .await;

    match result {
        Ok(outcome) => (StatusCode::OK, Html(page.with_outcome(&outcome).render())),
        Err(e) => {
            tracing::error!("Interaction failed: {}", e);
            let status = e.status_and_type().0;
            (status, Html(page.with_error(e.to_string()).render()))
        }
    }
}
