//! Plain-text extraction from uploaded office documents.
//!
//! Only `.docx` is decoded. Its body lives in `word/document.xml` inside a
//! zip container; paragraphs become lines and only run text (`w:t`) is kept,
//! so deleted revisions and field codes never reach the output.

use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use zip::ZipArchive;

/// Errors from document decoding.
#[derive(Debug, Error)]
pub enum DocumentTextError {
    #[error("unsupported document format: {0}")]
    Unsupported(String),

    #[error("failed to decode document: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for DocumentTextError {
    fn from(e: zip::result::ZipError) -> Self {
        DocumentTextError::Decode(e.to_string())
    }
}

impl From<quick_xml::Error> for DocumentTextError {
    fn from(e: quick_xml::Error) -> Self {
        DocumentTextError::Decode(e.to_string())
    }
}

const DOCUMENT_XML: &str = "word/document.xml";

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
}

impl DocumentKind {
    /// Detect the format from a filename's extension.
    pub fn from_filename(filename: &str) -> Result<Self, DocumentTextError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "docx" => Ok(Self::Docx),
            "" => Err(DocumentTextError::Unsupported("no extension".to_string())),
            other => Err(DocumentTextError::Unsupported(format!(".{}", other))),
        }
    }
}

/// Read the text of a `.docx` container.
pub fn docx_to_text<R: Read + Seek>(reader: R) -> Result<String, DocumentTextError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_XML)?.read_to_string(&mut xml)?;
    xml_to_text(&xml)
}

/// Decode a file on disk according to its reported name.
pub fn read_document(path: &Path, filename: &str) -> Result<String, DocumentTextError> {
    match DocumentKind::from_filename(filename)? {
        DocumentKind::Docx => docx_to_text(std::fs::File::open(path)?),
    }
}

/// Walk WordprocessingML and keep the visible run text.
fn xml_to_text(xml: &str) -> Result<String, DocumentTextError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;
    // Tab stops in paragraph properties are also `w:tab`.
    let mut in_tab_stops = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:tabs" => in_tab_stops = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" | b"w:br" | b"w:cr" => out.push('\n'),
                b"w:tab" if !in_tab_stops => out.push('\t'),
                _ => {}
            },
            Event::Text(e) if in_text => out.push_str(&e.unescape()?),
            Event::CData(e) if in_text => out.push_str(&String::from_utf8_lossy(&e)),
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:tabs" => in_tab_stops = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn docx(body: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_XML, SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(
                format!(
                    r#"<?xml version="1.0"?><w:document><w:body>{}</w:body></w:document>"#,
                    body
                )
                .as_bytes(),
            )
            .unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let bytes = docx(
            "<w:p><w:r><w:t>IMAGES:</w:t></w:r></w:p>\
             <w:p><w:r><w:t>1. Exekias, Achilles &amp; Ajax</w:t></w:r></w:p>\
             <w:p><w:r><w:tab/><w:t>- amphora</w:t></w:r></w:p>",
        );
        let text = docx_to_text(Cursor::new(bytes)).unwrap();
        assert_eq!(text, "IMAGES:\n1. Exekias, Achilles & Ajax\n\t- amphora");
    }

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(
            DocumentKind::from_filename("Lecture 4.DOCX").unwrap(),
            DocumentKind::Docx
        );
        assert!(matches!(
            DocumentKind::from_filename("lecture.doc"),
            Err(DocumentTextError::Unsupported(_))
        ));
        assert!(matches!(
            DocumentKind::from_filename("README"),
            Err(DocumentTextError::Unsupported(_))
        ));
    }

    #[test]
    fn test_corrupt_docx() {
        assert!(matches!(
            docx_to_text(Cursor::new(b"not a zip".to_vec())),
            Err(DocumentTextError::Decode(_))
        ));
    }

    #[test]
    fn test_numeric_character_references() {
        let bytes = docx("<w:p><w:r><w:t>1. Kouros &#8212; marble &#x2013; Attica</w:t></w:r></w:p>");
        let text = docx_to_text(Cursor::new(bytes)).unwrap();
        assert_eq!(text, "1. Kouros \u{2014} marble \u{2013} Attica");
    }

    #[test]
    fn test_deleted_revisions_are_dropped() {
        let bytes = docx(
            "<w:p><w:r><w:t>1. Kouros</w:t></w:r>\
             <w:del><w:r><w:delText> REMOVED</w:delText></w:r></w:del></w:p>",
        );
        assert_eq!(docx_to_text(Cursor::new(bytes)).unwrap(), "1. Kouros");
    }

    #[test]
    fn test_field_codes_are_dropped() {
        let bytes = docx(
            "<w:p><w:r><w:fldChar w:fldCharType=\"begin\"/></w:r>\
             <w:r><w:instrText xml:space=\"preserve\"> PAGE </w:instrText></w:r>\
             <w:r><w:fldChar w:fldCharType=\"separate\"/></w:r>\
             <w:r><w:t>4</w:t></w:r>\
             <w:r><w:fldChar w:fldCharType=\"end\"/></w:r></w:p>",
        );
        assert_eq!(docx_to_text(Cursor::new(bytes)).unwrap(), "4");
    }

    #[test]
    fn test_breaks_and_tab_stops() {
        let bytes = docx(
            "<w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr>\
             <w:r><w:t>Exekias</w:t><w:br/><w:t>amphora</w:t><w:cr/><w:tab/><w:t>- Vatican</w:t></w:r></w:p>\
             <w:p><w:r><w:t xml:space=\"preserve\">2. Kritios Boy </w:t></w:r></w:p>",
        );
        let text = docx_to_text(Cursor::new(bytes)).unwrap();
        assert_eq!(text, "Exekias\namphora\n\t- Vatican\n2. Kritios Boy");
    }
}
