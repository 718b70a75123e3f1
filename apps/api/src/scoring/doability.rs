//! Doability scoring — pluggable, trait-based scorer measuring how much of an
//! assignment's vocabulary the curriculum corpus covers.
//!
//! Default: `FrequencyScorer` (assignment tokens counted with repetition
//! against the curriculum token set, so repeated requirements weigh more).
//! Alternative: `SetIntersectionScorer` (unique-word intersection), kept as
//! a supported configuration.
//!
//! `AppState` holds an `Arc<dyn DoabilityScorer>`, swapped at startup via
//! `SCORING_BACKEND`.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Output data models (shared across all scorer backends)
// ────────────────────────────────────────────────────────────────────────────

/// Qualitative banding for display: below 40 = low, 40–70 = medium, 70+ = high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Band::High
        } else if score >= 40.0 {
            Band::Medium
        } else {
            Band::Low
        }
    }
}

/// Full doability report returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoabilityReport {
    /// Percentage in [0, 100], rounded to two decimals.
    pub score: f64,
    pub matched_tokens: usize,
    pub assignment_tokens: usize,
    pub band: Band,
    pub recommendation: String,
    pub scorer_backend: String, // "frequency" | "set" — for transparency
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The doability scorer trait. Implement this to swap scoring semantics
/// without touching the endpoint, handler, or caller code.
///
/// All three inputs must already be normalized (see [`super::normalize`]);
/// `extra_context` is appended verbatim, space-joined, to the assignment
/// before tokenizing. Scoring never fails: an empty curriculum simply covers
/// nothing and yields 0.
pub trait DoabilityScorer: Send + Sync {
    fn score(
        &self,
        assignment_text: &str,
        curriculum_text: &str,
        extra_context: &str,
    ) -> DoabilityReport;
}

/// Which scorer backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringBackend {
    Frequency,
    Set,
}

impl FromStr for ScoringBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frequency" => Ok(Self::Frequency),
            "set" => Ok(Self::Set),
            other => Err(format!("unknown scoring backend '{other}'")),
        }
    }
}

/// Constructs the scorer selected by config.
pub fn scorer_for(backend: ScoringBackend) -> Arc<dyn DoabilityScorer> {
    match backend {
        ScoringBackend::Frequency => Arc::new(FrequencyScorer),
        ScoringBackend::Set => Arc::new(SetIntersectionScorer),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FrequencyScorer — default backend
// ────────────────────────────────────────────────────────────────────────────

/// Stream-membership scorer. The assignment side keeps duplicates, so an
/// assignment that repeats an in-curriculum word scores higher; the
/// curriculum side is pure set membership.
pub struct FrequencyScorer;

impl DoabilityScorer for FrequencyScorer {
    fn score(
        &self,
        assignment_text: &str,
        curriculum_text: &str,
        extra_context: &str,
    ) -> DoabilityReport {
        let combined = join_with_context(assignment_text, extra_context);
        let tokens: Vec<&str> = combined.split_whitespace().collect();
        let reference: HashSet<&str> = curriculum_text.split_whitespace().collect();

        let matched = tokens.iter().filter(|t| reference.contains(**t)).count();
        build_report(matched, tokens.len(), "frequency")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SetIntersectionScorer — unique-word backend
// ────────────────────────────────────────────────────────────────────────────

/// Unique-word intersection scorer: both sides are de-duplicated before the
/// membership count. Selected via `SCORING_BACKEND=set`.
pub struct SetIntersectionScorer;

impl DoabilityScorer for SetIntersectionScorer {
    fn score(
        &self,
        assignment_text: &str,
        curriculum_text: &str,
        extra_context: &str,
    ) -> DoabilityReport {
        let combined = join_with_context(assignment_text, extra_context);
        let tokens: HashSet<&str> = combined.split_whitespace().collect();
        let reference: HashSet<&str> = curriculum_text.split_whitespace().collect();

        let matched = tokens.intersection(&reference).count();
        build_report(matched, tokens.len(), "set")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared scoring plumbing
// ────────────────────────────────────────────────────────────────────────────

fn join_with_context(assignment: &str, extra_context: &str) -> String {
    if extra_context.is_empty() {
        assignment.to_string()
    } else {
        format!("{assignment} {extra_context}")
    }
}

fn build_report(matched: usize, total: usize, backend: &str) -> DoabilityReport {
    let score = if total > 0 {
        round2(matched as f64 / total as f64 * 100.0)
    } else {
        0.0
    };
    let band = Band::from_score(score);

    DoabilityReport {
        score,
        matched_tokens: matched,
        assignment_tokens: total,
        band,
        recommendation: build_recommendation(score, band),
        scorer_backend: backend.to_string(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Builds a human-readable recommendation string from score and band.
fn build_recommendation(score: f64, band: Band) -> String {
    match band {
        Band::High => format!(
            "{score:.2}% of the assignment vocabulary is covered by the curriculum. Looks doable."
        ),
        Band::Medium => format!(
            "{score:.2}% covered. Parts of the assignment fall outside the curriculum; \
             adding context about known tools may help."
        ),
        Band::Low => format!(
            "{score:.2}% covered. Most of the assignment is not covered by the curriculum."
        ),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(assignment: &str, curriculum: &str, context: &str) -> DoabilityReport {
        FrequencyScorer.score(assignment, curriculum, context)
    }

    #[test]
    fn test_full_coverage_scores_100() {
        let report = freq(
            "build a rest api with node and express",
            "build a rest api with node express and",
            "",
        );
        assert_eq!(report.score, 100.0);
        assert_eq!(report.matched_tokens, 8);
        assert_eq!(report.assignment_tokens, 8);
        assert_eq!(report.band, Band::High);
    }

    #[test]
    fn test_partial_coverage_three_of_seven() {
        // 7 tokens, only {use, and, for} in the curriculum → 3/7 ≈ 42.86
        let report = freq("use python and django for the backend", "use and for", "");
        assert_eq!(report.matched_tokens, 3);
        assert_eq!(report.assignment_tokens, 7);
        assert!((report.score - 42.86).abs() < 0.001, "score was {}", report.score);
        assert_eq!(report.band, Band::Medium);
    }

    #[test]
    fn test_half_coverage_scores_50() {
        // {build, a, with} covered, {mobile, app, swift} not → 3/6
        let report = freq(
            "build a mobile app with swift",
            "build a with html css javascript",
            "",
        );
        assert_eq!(report.score, 50.0);
        assert_eq!(report.band, Band::Medium);
    }

    #[test]
    fn test_empty_assignment_scores_zero() {
        let report = freq("", "build a rest api", "");
        assert_eq!(report.score, 0.0);
        assert_eq!(report.assignment_tokens, 0);
        assert_eq!(report.band, Band::Low);
    }

    #[test]
    fn test_empty_curriculum_scores_zero() {
        let report = freq("build a rest api", "", "");
        assert_eq!(report.score, 0.0);
        assert_eq!(report.matched_tokens, 0);
        assert_eq!(report.assignment_tokens, 4);
    }

    #[test]
    fn test_covered_context_strictly_increases_score() {
        let curriculum = "build a with can do sqlite use";
        let base = freq("build a mobile app with swift", curriculum, "");
        let blended = freq("build a mobile app with swift", curriculum, "can do with sqlite");
        assert_eq!(base.score, 50.0);
        assert!(
            blended.score > base.score,
            "expected increase, got {} vs {}",
            blended.score,
            base.score
        );
    }

    #[test]
    fn test_uncovered_context_strictly_decreases_score() {
        let curriculum = "build a with";
        let base = freq("build a mobile app with swift", curriculum, "");
        let blended = freq("build a mobile app with swift", curriculum, "quantum blockchain");
        assert_eq!(base.score, 50.0);
        assert!(
            blended.score < base.score,
            "expected decrease, got {} vs {}",
            blended.score,
            base.score
        );
    }

    #[test]
    fn test_empty_context_adds_no_tokens() {
        let report = freq("build a rest api", "build a", "");
        assert_eq!(report.assignment_tokens, 4);
        assert_eq!(report.score, 50.0);
    }

    #[test]
    fn test_repeated_covered_tokens_weigh_more_than_set_backend() {
        // "rust" appears three times; frequency counts each, set collapses.
        let assignment = "rust rust rust python";
        let curriculum = "rust";
        let frequency = FrequencyScorer.score(assignment, curriculum, "");
        let set = SetIntersectionScorer.score(assignment, curriculum, "");

        assert_eq!(frequency.score, 75.0);
        assert_eq!(set.score, 50.0);
        assert_eq!(set.assignment_tokens, 2);
    }

    #[test]
    fn test_set_backend_empty_assignment_scores_zero() {
        let report = SetIntersectionScorer.score("", "anything", "");
        assert_eq!(report.score, 0.0);
        assert_eq!(report.scorer_backend, "set");
    }

    #[test]
    fn test_backend_labels() {
        assert_eq!(freq("a", "a", "").scorer_backend, "frequency");
        assert_eq!(SetIntersectionScorer.score("a", "a", "").scorer_backend, "set");
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::from_score(0.0), Band::Low);
        assert_eq!(Band::from_score(39.99), Band::Low);
        assert_eq!(Band::from_score(40.0), Band::Medium);
        assert_eq!(Band::from_score(69.99), Band::Medium);
        assert_eq!(Band::from_score(70.0), Band::High);
        assert_eq!(Band::from_score(100.0), Band::High);
    }

    #[test]
    fn test_recommendation_mentions_score() {
        let report = freq("use python and django for the backend", "use and for", "");
        assert!(report.recommendation.contains("42.86"));
    }

    #[test]
    fn test_scoring_backend_from_str() {
        assert_eq!("frequency".parse(), Ok(ScoringBackend::Frequency));
        assert_eq!("set".parse(), Ok(ScoringBackend::Set));
        assert!("llm".parse::<ScoringBackend>().is_err());
    }

    #[test]
    fn test_band_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Band::High).unwrap(), "\"high\"");
    }
}
