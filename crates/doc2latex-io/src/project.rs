//! Output project layout, ready for an online LaTeX editor.
//!
//! ```text
//! <out>/
//!   main.tex
//!   analysis.json
//!   enhanced_content.txt
//!   figures/  bib/  assets/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use doc2latex_core::{DocumentAnalysis, Metadata};
use serde::Serialize;
use tracing::info;

use crate::error::IoError;

pub const MAIN_TEX: &str = "main.tex";
pub const ANALYSIS_JSON: &str = "analysis.json";
pub const CONTENT_TXT: &str = "enhanced_content.txt";
pub const SUBDIRS: [&str; 3] = ["figures", "bib", "assets"];

/// Everything written for one converted document.
pub struct Project<'a> {
    pub latex: &'a str,
    pub content: &'a str,
    pub analysis: &'a DocumentAnalysis,
    pub metadata: &'a Metadata,
    pub suggestions: &'a [String],
    pub enhanced: bool,
    pub original_file: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub main_tex: PathBuf,
    pub analysis_json: PathBuf,
    pub content_txt: PathBuf,
}

#[derive(Serialize)]
struct AnalysisRecord<'a> {
    document_analysis: &'a DocumentAnalysis,
    metadata: &'a Metadata,
    suggestions: &'a [String],
    template_used: &'a str,
    enhanced: bool,
    original_file: Option<&'a str>,
    generated_at: String,
}

pub fn write_project(out: &Path, project: &Project<'_>) -> Result<ProjectPaths, IoError> {
    fs::create_dir_all(out)?;
    for sub in SUBDIRS {
        fs::create_dir_all(out.join(sub))?;
    }

    let paths = ProjectPaths {
        root: out.to_path_buf(),
        main_tex: out.join(MAIN_TEX),
        analysis_json: out.join(ANALYSIS_JSON),
        content_txt: out.join(CONTENT_TXT),
    };

    fs::write(&paths.main_tex, project.latex)?;

    let record = AnalysisRecord {
        document_analysis: project.analysis,
        metadata: project.metadata,
        suggestions: project.suggestions,
        template_used: &project.metadata.template,
        enhanced: project.enhanced,
        original_file: project.original_file,
        generated_at: chrono::Local::now().to_rfc3339(),
    };
    fs::write(&paths.analysis_json, serde_json::to_string_pretty(&record)?)?;
    fs::write(&paths.content_txt, project.content)?;

    info!(
        root = %out.display(),
        template = %project.metadata.template,
        "project written"
    );
    Ok(paths)
}
