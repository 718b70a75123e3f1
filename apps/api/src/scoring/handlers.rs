//! Axum route handlers for the Doability API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::{extract_document, DocumentFormat};
use crate::scoring::doability::{DoabilityReport, DoabilityScorer};
use crate::scoring::normalize::normalize;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreTextRequest {
    pub assignment_text: String,
    #[serde(default)]
    pub extra_context: String,
}

#[derive(Debug, Serialize)]
pub struct DoabilityResponse {
    #[serde(flatten)]
    pub report: DoabilityReport,
    pub warnings: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/doability/score
///
/// Multipart form: `file` (the assignment document: PDF, DOC/DOCX, PNG/JPEG)
/// and optional `context` free text that should count toward coverage.
/// Extraction failure of the upload degrades to empty text with a warning;
/// an unsupported declared type rejects the run before extraction.
pub async fn handle_score_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DoabilityResponse>, AppError> {
    let mut upload: Option<(DocumentFormat, Bytes, String)> = None;
    let mut extra_context = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Extraction(format!("Malformed multipart payload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .ok_or_else(|| {
                        AppError::UnsupportedFormat(
                            "Uploaded file has no declared content type".to_string(),
                        )
                    })?
                    .to_string();
                let format = DocumentFormat::from_mime(&content_type).ok_or_else(|| {
                    AppError::UnsupportedFormat(format!("Unsupported file type: {content_type}"))
                })?;
                let data = field.bytes().await.map_err(|e| {
                    AppError::Extraction(format!("Failed to read uploaded file: {e}"))
                })?;
                upload = Some((format, data, file_name));
            }
            Some("context") => {
                extra_context = field.text().await.map_err(|e| {
                    AppError::Extraction(format!("Failed to read context field: {e}"))
                })?;
            }
            _ => {}
        }
    }

    let (format, data, file_name) = upload.ok_or_else(|| {
        AppError::Validation("Missing 'file' field in multipart upload".to_string())
    })?;

    info!("Scoring upload {file_name} ({format:?}, {} bytes)", data.len());

    let mut warnings = Vec::new();
    let content = match extract_document(format, &data).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Extraction failed for {file_name}: {e}");
            warnings.push(format!("Could not extract text from '{file_name}': {e}"));
            String::new()
        }
    };

    let response = score_against_curriculum(&state, &content, &extra_context, warnings).await?;
    Ok(Json(response))
}

/// POST /api/v1/doability/score-text
///
/// Scores raw assignment text against the curriculum without extraction.
/// Useful for pasting an assignment brief instead of uploading a document.
pub async fn handle_score_text(
    State(state): State<AppState>,
    Json(request): Json<ScoreTextRequest>,
) -> Result<Json<DoabilityResponse>, AppError> {
    if request.assignment_text.trim().is_empty() {
        return Err(AppError::Validation(
            "assignment_text cannot be empty".to_string(),
        ));
    }

    let response = score_against_curriculum(
        &state,
        &request.assignment_text,
        &request.extra_context,
        Vec::new(),
    )
    .await?;
    Ok(Json(response))
}

/// Shared pipeline tail: load the curriculum, normalize all three inputs,
/// and run the configured scorer.
async fn score_against_curriculum(
    state: &AppState,
    raw_assignment: &str,
    raw_context: &str,
    mut warnings: Vec<String>,
) -> Result<DoabilityResponse, AppError> {
    let corpus = state.corpus.load_combined().await?;
    warnings.extend(corpus.warnings);

    let assignment = normalize(raw_assignment);
    let curriculum = normalize(&corpus.text);
    let context = normalize(raw_context);

    let report = state
        .scorer
        .score(assignment.trim(), curriculum.trim(), context.trim());

    Ok(DoabilityResponse { report, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::doability::FrequencyScorer;

    #[test]
    fn test_score_text_request_defaults_context_to_empty() {
        let request: ScoreTextRequest =
            serde_json::from_str(r#"{"assignment_text": "build a rest api"}"#).unwrap();
        assert_eq!(request.assignment_text, "build a rest api");
        assert!(request.extra_context.is_empty());
    }

    #[test]
    fn test_doability_response_flattens_report_fields() {
        let report = FrequencyScorer.score("build a rest api", "build a rest api", "");
        let response = DoabilityResponse {
            report,
            warnings: vec!["something degraded".to_string()],
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["score"], 100.0);
        assert_eq!(value["band"], "high");
        assert_eq!(value["scorer_backend"], "frequency");
        assert_eq!(value["warnings"][0], "something degraded");
    }
}
