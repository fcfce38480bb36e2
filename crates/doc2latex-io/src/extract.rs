//! Raw text extraction by file extension.
//!
//! `.txt` is read as UTF-8, `.docx` paragraphs are joined with newlines,
//! `.pdf` pages are extracted in-process and joined the same way, and
//! anything else is tried as text. A file that exists but cannot be read
//! yields an empty string; the pipeline then rejects it as having no
//! content.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use pdf_oxide::PdfDocument;
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::error::IoError;

const DOCUMENT_XML: &str = "word/document.xml";

pub fn extract_text(path: &Path) -> Result<String, IoError> {
    if !path.is_file() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let result = match ext.as_str() {
        "docx" => docx_text(path),
        "pdf" => pdf_text(path),
        _ => std::fs::read_to_string(path).map_err(IoError::from),
    };
    match result {
        Ok(text) => {
            info!(path = %path.display(), format = %ext, chars = text.len(), "text extracted");
            Ok(text)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "extraction failed, treating as empty");
            Ok(String::new())
        }
    }
}

pub fn docx_text(path: &Path) -> Result<String, IoError> {
    let file = BufReader::new(File::open(path)?);
    docx_text_from_reader(file).map_err(|e| match e {
        IoError::MissingDocumentXml(_) => IoError::MissingDocumentXml(path.to_path_buf()),
        other => other,
    })
}

/// Paragraph text of a word-processor archive, one line per `w:p`.
pub fn docx_text_from_reader<R: Read + Seek>(reader: R) -> Result<String, IoError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut xml = Vec::new();
    match archive.by_name(DOCUMENT_XML) {
        Ok(mut entry) => {
            entry.read_to_end(&mut xml)?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(IoError::MissingDocumentXml(DOCUMENT_XML.into()));
        }
        Err(e) => return Err(e.into()),
    }
    paragraphs_from_xml(&xml)
}

/// Nested paragraphs (text boxes) become lines of their own, emitted
/// before the paragraph that holds them.
fn paragraphs_from_xml(xml: &[u8]) -> Result<String, IoError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut lines: Vec<String> = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(line) = open.pop() {
                        lines.push(line);
                    }
                }
                b"t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) => match (e.local_name().as_ref(), open.last_mut()) {
                (b"p", _) => lines.push(String::new()),
                (b"tab", Some(current)) => current.push('\t'),
                (b"br" | b"cr", Some(current)) => current.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text => {
                if let Some(current) = open.last_mut() {
                    current.push_str(&e.unescape().map_err(quick_xml::Error::from)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(lines.join("\n"))
}

fn pdf_text(path: &Path) -> Result<String, IoError> {
    let mut doc = PdfDocument::open(path)?;
    let pages = doc.page_count()?;
    let mut text = Vec::with_capacity(pages);
    for page in 0..pages {
        text.push(doc.extract_text(page)?);
    }
    debug!(path = %path.display(), pages, "pdf pages extracted");
    Ok(text.join("\n"))
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;

    use super::*;

    const DOC_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>OFFICE MEMORANDUM</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t xml:space="preserve">Subject: </w:t></w:r><w:r><w:t>Leave &amp; Travel</w:t></w:r></w:p>
    <w:p><w:r><w:t>Col A</w:t><w:tab/><w:t>Col B</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn docx_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn docx_paragraphs_become_lines() {
        let bytes = docx_bytes(&[(DOCUMENT_XML, DOC_XML)]);
        let text = docx_text_from_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(
            text,
            "OFFICE MEMORANDUM\n\nSubject: Leave & Travel\nCol A\tCol B"
        );
    }

    #[test]
    fn docx_without_document_xml() {
        let bytes = docx_bytes(&[("word/styles.xml", "<w:styles/>")]);
        let err = docx_text_from_reader(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, IoError::MissingDocumentXml(_)));
    }

    #[test]
    fn txt_passthrough() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.txt");
        std::fs::write(&path, "CIRCULAR\nBody").unwrap();
        assert_eq!(extract_text(&path).unwrap(), "CIRCULAR\nBody");
    }

    #[test]
    fn unknown_extension_read_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# Notes").unwrap();
        assert_eq!(extract_text(&path).unwrap(), "# Notes");
    }

    #[test]
    fn docx_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.DOCX");
        std::fs::write(&path, docx_bytes(&[(DOCUMENT_XML, DOC_XML)])).unwrap();
        assert!(extract_text(&path).unwrap().starts_with("OFFICE MEMORANDUM"));
    }

    #[test]
    fn unreadable_file_is_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip").unwrap();
        assert_eq!(extract_text(&path).unwrap(), "");

        let binary = dir.path().join("blob.txt");
        std::fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
        assert_eq!(extract_text(&binary).unwrap(), "");
    }

    #[test]
    fn text_box_paragraph_keeps_outer_text() {
        let xml = br#"<w:document xmlns:w="w"><w:body>
<w:p><w:r><w:t xml:space="preserve">Before </w:t></w:r><w:r><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent></w:r><w:r><w:t>after</w:t></w:r></w:p>
</w:body></w:document>"#;
        assert_eq!(paragraphs_from_xml(xml).unwrap(), "Boxed\nBefore after");
    }

    /// One page, Helvetica, a single text run.
    fn pdf_bytes(text: &str) -> Vec<u8> {
        let stream = format!("BT /F1 18 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
            format!("<< /Length {} >>\nstream\n{stream}\nendstream", stream.len()),
        ];

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }

    #[test]
    fn pdf_text_is_extracted_in_process() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.pdf");
        std::fs::write(&path, pdf_bytes("OFFICE MEMORANDUM")).unwrap();
        let text = extract_text(&path).unwrap();
        assert!(text.contains("OFFICE"), "extracted: {text:?}");
        assert!(text.contains("MEMORANDUM"), "extracted: {text:?}");
    }

    #[test]
    fn corrupt_pdf_is_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();
        assert_eq!(extract_text(&path).unwrap(), "");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = extract_text(Path::new("/nonexistent/input.txt")).unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));
    }
}
