use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::SourceDocument;
use crate::scoring::{AnalysisResult, ScoreRequest};
use crate::state::AppState;
use crate::upload::{format_file_size, UploadForm};

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub upload_id: Uuid,
    pub file_name: String,
    pub size: String,
    pub analyzed_at: DateTime<Utc>,
    pub result: AnalysisResult,
}

/// POST /api/v1/resumes/analyze
///
/// Multipart fields `resume_files` (PDF or DOCX) and optional `jd_text`.
/// Forwards the resume to the scoring webhook and returns its normalized verdict.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let scorer = state.scorer.clone().ok_or(AppError::ScoringNotConfigured)?;

    let mut form = UploadForm::read(&mut multipart).await?;
    let upload = form.take_file("resume_files").ok_or_else(|| {
        AppError::Validation("multipart field 'resume_files' is required".to_string())
    })?;

    let bytes = upload.bytes.clone();
    let document = SourceDocument::new(upload.file_name, upload.content_type, upload.bytes)?;
    if !document.kind().is_resume_format() {
        return Err(AppError::UnsupportedFileType(format!(
            "{}: resumes must be PDF or DOCX",
            document.file_name()
        )));
    }

    let upload_id = Uuid::new_v4();
    let file_name = document.file_name().to_string();
    let size = format_file_size(document.len());

    info!(
        upload_id = %upload_id,
        file_name = %file_name,
        kind = document.kind().as_str(),
        "Sending resume for scoring"
    );

    let result = scorer
        .score(ScoreRequest {
            file_name: file_name.clone(),
            kind: document.kind(),
            bytes,
            jd_text: form.text("jd_text").map(str::to_string),
        })
        .await?;

    Ok(Json(AnalyzeResponse {
        upload_id,
        file_name,
        size,
        analyzed_at: Utc::now(),
        result,
    }))
}
