// Doability Scoring Engine
// Implements: text normalization, overlap scoring, result banding, HTTP handlers.
// Extraction and corpus retrieval live in their own modules; no file I/O here.

pub mod doability;
pub mod handlers;
pub mod normalize;

pub use doability::{scorer_for, DoabilityScorer, ScoringBackend};
