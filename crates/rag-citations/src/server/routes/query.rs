//! JSON query endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::generation::answer_submission;
use crate::server::state::AppState;
use crate::types::response::{AnswerView, Outcome};
use crate::ui::Submission;

/// POST /api/query - Same multipart form as the page, answered as JSON
pub async fn query_json(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnswerView>> {
    if let Some(err) = state.credential_error() {
        return Err(err);
    }

    let submission = Submission::from_multipart(multipart, &state.config().ui).await?;

    let outcome = answer_submission(
        state.chat_provider(),
        &state.config().cohere.api_key_env,
        state.request_builder(),
        &submission.query,
        submission.uploads,
    )
    .await?;

    match outcome {
        Outcome::Answered(view) => Ok(Json(view)),
        Outcome::NeedsInput(message) => Err(Error::NeedsInput(message)),
    }
}
