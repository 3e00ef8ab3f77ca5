use crate::models::{DocumentOutcome, FileList};
use crate::startup::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

pub async fn random_document(State(state): State<AppState>) -> Result<Response, AppError> {
    let outcome = state.store.pick_random().await?;
    outcome_response(outcome, "No JSON files found")
}

pub async fn list_documents(State(state): State<AppState>) -> Result<Json<FileList>, AppError> {
    let files = state.store.list_documents().await?;
    Ok(Json(FileList { files }))
}

/// A segment that does not decode to UTF-8 cannot name a listed file, so it
/// is reported as missing rather than as a malformed request.
pub async fn get_document(
    State(state): State<AppState>,
    filename: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(filename) = filename.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Undecodable document name");
        AppError::NotFound(anyhow::anyhow!("File not found"))
    })?;
    let outcome = state.store.get_by_name(&filename).await?;
    outcome_response(outcome, "File not found")
}

/// Unreadable documents are served as a 200 carrying an `{"error": ...}` body,
/// so clients have to inspect the payload to tell them apart.
fn outcome_response(outcome: DocumentOutcome, absent_message: &str) -> Result<Response, AppError> {
    match outcome {
        DocumentOutcome::Found(document) => Ok(Json(document).into_response()),
        DocumentOutcome::Absent => Err(AppError::NotFound(anyhow::anyhow!(
            "{}",
            absent_message
        ))),
        DocumentOutcome::Unreadable(err) => {
            tracing::warn!(document = %err.name, error = %err.message, "Serving unreadable document");
            Ok(Json(err.to_body()).into_response())
        }
    }
}
