use std::sync::Arc;

use crate::corpus::CorpusStore;
use crate::scoring::DoabilityScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Downloaded curriculum reference cache, populated at startup.
    pub corpus: Arc<CorpusStore>,
    /// Pluggable doability scorer. Default: FrequencyScorer. Swap via SCORING_BACKEND env.
    pub scorer: Arc<dyn DoabilityScorer>,
}
