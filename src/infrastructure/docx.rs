//! Word document text extraction.
//!
//! A `.docx` file is a zip archive; the document body lives in
//! `word/document.xml`. The extractor stream-parses that part and yields
//! one string per `<w:p>` paragraph, skipping paragraphs that contain no
//! visible text. The evaluation core never sees the container format, only
//! the resulting paragraph sequence.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use zip::ZipArchive;

/// Errors from `.docx` extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("File must be a .docx file: {0}")]
    NotADocx(PathBuf),

    #[error("Failed to read {path}: {message}")]
    Container { path: PathBuf, message: String },

    #[error("Failed to parse document XML in {path}: {message}")]
    Xml { path: PathBuf, message: String },
}

/// Extracts paragraph text from `.docx` files.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the document's paragraphs, in order.
    ///
    /// Whitespace-only paragraphs are dropped, matching what the chunker
    /// would do anyway; an empty result means the document has no
    /// extractable content.
    pub fn extract_paragraphs(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }
        if !path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
        {
            return Err(ExtractError::NotADocx(path.to_path_buf()));
        }

        let container = |message: String| ExtractError::Container {
            path: path.to_path_buf(),
            message,
        };

        let file = File::open(path).map_err(|e| container(e.to_string()))?;
        let mut archive = ZipArchive::new(file).map_err(|e| container(e.to_string()))?;
        let mut part = archive
            .by_name("word/document.xml")
            .map_err(|e| container(format!("missing word/document.xml: {e}")))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| container(e.to_string()))?;

        parse_document_xml(&xml).map_err(|message| ExtractError::Xml {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Extract the full document text with paragraphs joined by blank
    /// lines, the separator the chunker splits on.
    pub fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        Ok(self.extract_paragraphs(path)?.join("\n\n"))
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk the WordprocessingML body and collect visible paragraph text.
///
/// Text lives in `<w:t>` runs inside `<w:p>` paragraphs; tabs and line
/// breaks are explicit empty elements.
fn parse_document_xml(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" => in_text = in_paragraph,
                _ => {}
            },
            Event::Empty(e) if in_paragraph => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                current.push_str(&t.unescape().map_err(|e| e.to_string())?);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    in_paragraph = false;
                    if !current.trim().is_empty() {
                        paragraphs.push(current.trim().to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Second </w:t></w:r><w:r><w:t>paragraph.</w:t></w:r></w:p>
    <w:p><w:r><w:t>   </w:t></w:r></w:p>
    <w:p><w:r><w:t>Tabbed</w:t><w:tab/><w:t>text &amp; more.</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn write_docx(dir: &Path, name: &str, document_xml: &str) -> PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap();
        path
    }

    #[test]
    fn parses_paragraphs_joining_runs_and_skipping_blanks() {
        let paragraphs = parse_document_xml(DOCUMENT_XML).unwrap();
        assert_eq!(
            paragraphs,
            vec![
                "First paragraph.",
                "Second paragraph.",
                "Tabbed\ttext & more.",
            ]
        );
    }

    #[test]
    fn extracts_from_a_real_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_docx(dir.path(), "sample.docx", DOCUMENT_XML);

        let extractor = DocxExtractor::new();
        let text = extractor.extract_text(&path).unwrap();
        assert!(text.starts_with("First paragraph.\n\nSecond paragraph."));
    }

    #[test]
    fn rejects_missing_files_and_wrong_extensions() {
        let extractor = DocxExtractor::new();
        assert!(matches!(
            extractor.extract_paragraphs(Path::new("/no/such/file.docx")),
            Err(ExtractError::NotFound(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "plain text").unwrap();
        assert!(matches!(
            extractor.extract_paragraphs(&txt),
            Err(ExtractError::NotADocx(_))
        ));
    }

    #[test]
    fn garbage_container_is_a_container_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        assert!(matches!(
            DocxExtractor::new().extract_paragraphs(&path),
            Err(ExtractError::Container { .. })
        ));
    }
}
