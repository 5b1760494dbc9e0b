use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::scoring::{normalize_analysis, AnalysisResult, ResumeScorer, ScoreRequest, ScoringError};

const MAX_RETRIES: u32 = 3;
const RESUME_FIELD: &str = "resume_files";
const JD_FIELD: &str = "jd_text";

/// Posts resumes to the analysis webhook as `multipart/form-data`.
/// Retries on 429 and 5xx with exponential backoff.
#[derive(Clone)]
pub struct WebhookScorer {
    client: Client,
    url: String,
    backoff_base: Duration,
}

impl WebhookScorer {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ScoringError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
            backoff_base: Duration::from_secs(1),
        })
    }

    /// Overrides the first retry delay (doubling afterwards).
    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    fn form(request: &ScoreRequest) -> Result<Form, ScoringError> {
        let part = Part::bytes(request.bytes.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(request.kind.media_type())?;

        let mut form = Form::new().part(RESUME_FIELD, part);
        if let Some(jd) = request.jd_text.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            form = form.text(JD_FIELD, jd.to_string());
        }
        Ok(form)
    }
}

/// Outcome of one failed webhook call.
enum Attempt {
    Retry(ScoringError),
    Fail(ScoringError),
}

impl WebhookScorer {
    async fn attempt(&self, request: &ScoreRequest) -> Result<AnalysisResult, Attempt> {
        // A multipart body is consumed by sending, so it is rebuilt per attempt.
        let form = Self::form(request).map_err(Attempt::Fail)?;
        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Attempt::Retry(ScoringError::Http(e)))?;

        let status = response.status();

        if status.as_u16() == 429 || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            warn!("Scoring webhook returned {}: {}", status, body);
            return Err(Attempt::Retry(ScoringError::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Attempt::Fail(ScoringError::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Attempt::Fail(ScoringError::Http(e)))?;
        Ok(normalize_analysis(&body))
    }
}

#[async_trait]
impl ResumeScorer for WebhookScorer {
    async fn score(&self, request: ScoreRequest) -> Result<AnalysisResult, ScoringError> {
        let mut attempt = 0;

        loop {
            match self.attempt(&request).await {
                Ok(analysis) => {
                    debug!(
                        file_name = %request.file_name,
                        score = analysis.score,
                        "Scoring webhook call succeeded"
                    );
                    return Ok(analysis);
                }
                Err(Attempt::Fail(e)) => return Err(e),
                Err(Attempt::Retry(e)) => {
                    attempt += 1;
                    if attempt == MAX_RETRIES {
                        return Err(e);
                    }

                    let delay = self.backoff_base * (1 << (attempt - 1));
                    warn!(
                        "Scoring webhook attempt {} failed, retrying after {}ms...",
                        attempt,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
