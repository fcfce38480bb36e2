use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_oxide::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("word/document.xml missing from {0}")]
    MissingDocumentXml(PathBuf),

    #[error("main.tex not found in {0}")]
    MissingMainTex(PathBuf),
}
