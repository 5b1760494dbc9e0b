use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;
use crate::extraction::{DocumentKind, ExtractionOutcome, SourceDocument};
use crate::state::AppState;
use crate::upload::UploadForm;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub file_name: String,
    pub kind: DocumentKind,
    #[serde(flatten)]
    pub outcome: ExtractionOutcome,
}

/// POST /api/v1/documents/extract
///
/// Multipart field `file`. Responds with the extracted text, or the fallback JD
/// (`used_fallback: true`) when the file could not be read.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut form = UploadForm::read(&mut multipart).await?;
    let upload = form
        .take_file("file")
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    let document = SourceDocument::new(upload.file_name, upload.content_type, upload.bytes)?;
    let file_name = document.file_name().to_string();
    let kind = document.kind();

    let extractor = state.extractor.clone();
    let outcome = extract_blocking(&file_name, move || extractor.extract(&document)).await;

    Ok(Json(ExtractResponse {
        file_name,
        kind,
        outcome,
    }))
}

/// Runs `job` on the blocking pool. A panicked or cancelled task yields the fallback.
async fn extract_blocking<F>(file_name: &str, job: F) -> ExtractionOutcome
where
    F: FnOnce() -> ExtractionOutcome + Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(file_name = %file_name, "extraction task failed, using fallback: {e}");
            ExtractionOutcome::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completed_task_outcome_is_returned() {
        let outcome = extract_blocking("jd.txt", || ExtractionOutcome {
            text: "Backend Engineer".to_string(),
            used_fallback: false,
        })
        .await;
        assert_eq!(outcome.text, "Backend Engineer");
        assert!(!outcome.used_fallback);
    }

    #[tokio::test]
    async fn test_panicked_task_uses_fallback() {
        let outcome = extract_blocking("broken.pdf", || -> ExtractionOutcome {
            panic!("extractor blew up")
        })
        .await;
        assert_eq!(outcome, ExtractionOutcome::fallback());
    }
}
