use std::io::{Cursor, Read};

use async_trait::async_trait;
use regex::Regex;

use super::{ExtractError, TextExtractor};

/// Extracts paragraph text from a DOCX archive (`word/document.xml`).
///
/// Legacy `.doc` uploads take the same path; a non-zip payload fails
/// extraction with a typed error the caller reports per-file.
pub struct DocxExtractor;

#[async_trait]
impl TextExtractor for DocxExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractError::Docx(format!("not a valid archive: {e}")))?;

        let mut document = archive
            .by_name("word/document.xml")
            .map_err(|e| ExtractError::Docx(format!("missing word/document.xml: {e}")))?;

        let mut xml = String::new();
        document.read_to_string(&mut xml)?;

        Ok(document_text(&xml))
    }
}

/// Pulls the text content of `<w:t>` runs, joining paragraphs with newlines.
fn document_text(xml: &str) -> String {
    let run = Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>").expect("static regex");

    xml.split("</w:p>")
        .map(|paragraph| {
            run.captures_iter(paragraph)
                .map(|c| unescape(&c[1]))
                .collect::<String>()
        })
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    const SAMPLE_XML: &str = r#"<?xml version="1.0"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
          <w:body>
            <w:p><w:r><w:t>Build a REST API</w:t></w:r><w:r><w:t xml:space="preserve"> with Node</w:t></w:r></w:p>
            <w:p><w:r><w:t>Ampersands &amp; angles &lt;ok&gt;</w:t></w:r></w:p>
            <w:p></w:p>
          </w:body>
        </w:document>"#;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let cursor = Cursor::new(&mut buf);
            let mut writer = zip::ZipWriter::new(cursor);
            writer
                .start_file("word/document.xml", FileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_document_text_joins_runs_and_paragraphs() {
        let text = document_text(SAMPLE_XML);
        assert_eq!(text, "Build a REST API with Node\nAmpersands & angles <ok>");
    }

    #[test]
    fn test_document_text_empty_body() {
        assert_eq!(document_text("<w:document></w:document>"), "");
    }

    #[tokio::test]
    async fn test_extract_reads_document_xml() {
        let bytes = build_docx(SAMPLE_XML);
        let text = DocxExtractor.extract(&bytes).await.unwrap();
        assert!(text.contains("Build a REST API with Node"));
    }

    #[tokio::test]
    async fn test_extract_rejects_non_archive_bytes() {
        let result = DocxExtractor.extract(b"plainly not a zip file").await;
        assert!(matches!(result, Err(ExtractError::Docx(_))));
    }

    #[tokio::test]
    async fn test_extract_rejects_archive_without_document_xml() {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
            writer.start_file("other.txt", FileOptions::default()).unwrap();
            writer.write_all(b"hello").unwrap();
            writer.finish().unwrap();
        }
        let result = DocxExtractor.extract(&buf).await;
        assert!(matches!(result, Err(ExtractError::Docx(_))));
    }
}
