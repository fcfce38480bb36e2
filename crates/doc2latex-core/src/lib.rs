pub mod analysis;
pub mod config;
pub mod error;
pub mod metadata;
pub mod text;

pub use analysis::{DEFAULT_TEMPLATE, DocumentAnalysis, DocumentType};
pub use config::Config;
pub use error::{ConfigError, InputError, UnknownDocumentType};
pub use metadata::{Metadata, Overrides, assemble, assemble_dated};
