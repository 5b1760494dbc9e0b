use std::sync::Arc;

use crate::config::Config;
use crate::extraction::DocumentTextExtractor;
use crate::scoring::ResumeScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stateless; shared with blocking tasks during extraction.
    pub extractor: Arc<DocumentTextExtractor>,
    /// `None` when no scoring webhook is configured.
    pub scorer: Option<Arc<dyn ResumeScorer>>,
}
