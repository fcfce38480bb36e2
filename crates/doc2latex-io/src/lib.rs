//! File-system side of doc2latex: reading source documents, laying out the
//! output project and zipping it for upload.

pub mod error;
pub mod extract;
pub mod package;
pub mod project;

pub use error::IoError;
pub use extract::extract_text;
pub use package::{PackageSummary, package_project};
pub use project::{Project, ProjectPaths, write_project};
