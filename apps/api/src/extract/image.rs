use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

use super::{ExtractError, TextExtractor};

/// OCR on PNG/JPEG uploads via the `tesseract` binary.
pub struct ImageExtractor;

impl ImageExtractor {
    /// Check whether the `tesseract` binary is available on the system.
    pub async fn available() -> bool {
        Command::new("tesseract")
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl TextExtractor for ImageExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        if !Self::available().await {
            return Err(ExtractError::Ocr(
                "tesseract not found - install tesseract-ocr for image uploads".to_string(),
            ));
        }

        let image = NamedTempFile::new()?;
        std::fs::write(image.path(), bytes)?;

        let output = Command::new("tesseract")
            .arg(image.path())
            .arg("stdout")
            .output()
            .await
            .map_err(|e| ExtractError::Ocr(format!("failed to run tesseract: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        debug!("OCR produced {} bytes of text", output.stdout.len());
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
