//! LaTeX side of the pipeline: rule-based restructuring, escaping and
//! template rendering. No I/O and no external calls.

pub mod escape;
pub mod offline;
pub mod rules;
pub mod templates;

pub use escape::{EscapeMode, clean_content, clean_layout, escape_markup, escape_plain};
pub use offline::OfflineDocument;
pub use rules::restructure;
pub use templates::{TemplateId, render};
