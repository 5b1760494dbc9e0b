//! Resume scoring: relays uploaded resumes to the external analysis webhook and
//! normalizes whatever shape it answers with.
//!
//! `AppState` holds an `Option<Arc<dyn ResumeScorer>>`; the default backend is
//! `WebhookScorer`.

pub mod handlers;
pub mod webhook;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::extraction::DocumentKind;

pub use webhook::WebhookScorer;

const NO_SUMMARY: &str = "No summary provided";
const NO_ANALYSIS: &str = "No analysis returned from server";

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// What the webhook recommends doing with the candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedAction {
    Interview,
    Reject,
    #[default]
    Hold,
}

impl RecommendedAction {
    /// Unknown or missing values map to `Hold`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "interview" => Self::Interview,
            "reject" => Self::Reject,
            _ => Self::Hold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub score: f64,
    pub summary: String,
    pub recommended_action: RecommendedAction,
}

/// One resume to score, optionally against a job description.
#[derive(Debug, Clone)]
pub struct ScoreRequest {
    pub file_name: String,
    pub kind: DocumentKind,
    pub bytes: Bytes,
    pub jd_text: Option<String>,
}

/// Implement this to swap the scoring backend without touching the handler.
#[async_trait]
pub trait ResumeScorer: Send + Sync {
    async fn score(&self, request: ScoreRequest) -> Result<AnalysisResult, ScoringError>;
}

/// Picks the analysis out of a webhook body.
///
/// The webhook has answered with `{"results": [..]}`, `{"result": {..}}` and a bare
/// object; the first non-null of those wins. Missing fields get defaults.
pub fn normalize_analysis(body: &Value) -> AnalysisResult {
    let payload = body
        .get("results")
        .and_then(|r| r.get(0))
        .filter(|v| !v.is_null())
        .or_else(|| body.get("result").filter(|v| !v.is_null()))
        .unwrap_or(body);

    if payload.is_null() {
        return AnalysisResult {
            score: 0.0,
            summary: NO_ANALYSIS.to_string(),
            recommended_action: RecommendedAction::Hold,
        };
    }

    AnalysisResult {
        score: payload.get("score").and_then(Value::as_f64).unwrap_or(0.0),
        summary: payload
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or(NO_SUMMARY)
            .to_string(),
        recommended_action: payload
            .get("recommendedAction")
            .and_then(Value::as_str)
            .map(RecommendedAction::parse)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_results_array_takes_precedence() {
        let body = json!({
            "results": [{"score": 82, "summary": "Strong Rust background", "recommendedAction": "Interview"}],
            "result": {"score": 10}
        });
        let analysis = normalize_analysis(&body);
        assert_eq!(analysis.score, 82.0);
        assert_eq!(analysis.summary, "Strong Rust background");
        assert_eq!(analysis.recommended_action, RecommendedAction::Interview);
    }

    #[test]
    fn test_result_object_is_used_when_no_results() {
        let body = json!({"result": {"score": 35.5, "summary": "Missing SQL", "recommendedAction": "Reject"}});
        let analysis = normalize_analysis(&body);
        assert_eq!(analysis.score, 35.5);
        assert_eq!(analysis.recommended_action, RecommendedAction::Reject);
    }

    #[test]
    fn test_bare_object_is_the_analysis() {
        let analysis = normalize_analysis(&json!({"score": 60}));
        assert_eq!(analysis.score, 60.0);
        assert_eq!(analysis.summary, NO_SUMMARY);
        assert_eq!(analysis.recommended_action, RecommendedAction::Hold);
    }

    #[test]
    fn test_empty_results_fall_through() {
        let analysis = normalize_analysis(&json!({"results": [], "result": {"score": 71}}));
        assert_eq!(analysis.score, 71.0);
    }

    #[test]
    fn test_null_body_reports_missing_analysis() {
        let analysis = normalize_analysis(&Value::Null);
        assert_eq!(analysis.score, 0.0);
        assert_eq!(analysis.summary, NO_ANALYSIS);
    }

    #[test]
    fn test_unknown_action_is_hold() {
        assert_eq!(RecommendedAction::parse("Maybe later"), RecommendedAction::Hold);
        assert_eq!(RecommendedAction::parse(" interview "), RecommendedAction::Interview);
    }
}
