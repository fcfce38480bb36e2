use std::path::PathBuf;

use thiserror::Error;

/// Source text could not be used as pipeline input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("no text could be extracted from the document")]
    NoContent,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised document type: {0}")]
pub struct UnknownDocumentType(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
