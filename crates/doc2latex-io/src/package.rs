//! Zip a project directory for upload to an online LaTeX editor.
//!
//! Sources and images are included; build by-products and hidden
//! directories are left out.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::IoError;
use crate::project::MAIN_TEX;

pub const INCLUDED_EXTENSIONS: [&str; 9] =
    ["tex", "bib", "cls", "sty", "png", "jpg", "jpeg", "pdf", "eps"];

pub const EXCLUDED_FILES: [&str; 6] = [
    "main.aux",
    "main.log",
    "main.out",
    "main.toc",
    "main.fls",
    "main.fdb_latexmk",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    pub archive: PathBuf,
    /// Archive entry names, `/`-separated, sorted.
    pub entries: Vec<String>,
}

/// Zip `src` into `zip_path`. With `validate`, a project without `main.tex`
/// is rejected before anything is written.
pub fn package_project(src: &Path, zip_path: &Path, validate: bool) -> Result<PackageSummary, IoError> {
    if !src.is_dir() {
        return Err(IoError::NotFound(src.to_path_buf()));
    }
    if validate && !src.join(MAIN_TEX).is_file() {
        return Err(IoError::MissingMainTex(src.to_path_buf()));
    }

    let mut files = Vec::new();
    collect(src, src, &mut files)?;
    files.sort();

    let skip = fs::canonicalize(zip_path).ok();
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(File::create(zip_path)?);
    let mut entries = Vec::with_capacity(files.len());
    for (name, path) in files {
        if skip.is_some() && fs::canonicalize(&path).ok() == skip {
            continue;
        }
        debug!(entry = %name, "adding to archive");
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&fs::read(&path)?)?;
        entries.push(name);
    }
    zip.finish()?;

    info!(
        archive = %zip_path.display(),
        files = entries.len(),
        "project packaged"
    );
    Ok(PackageSummary {
        archive: zip_path.to_path_buf(),
        entries,
    })
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<(String, PathBuf)>) -> Result<(), IoError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() {
            if !name.starts_with('.') {
                collect(root, &path, out)?;
            }
        } else if is_packaged(&name) {
            let rel = path.strip_prefix(root).unwrap_or(path.as_path());
            let entry_name = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push((entry_name, path));
        }
    }
    Ok(())
}

fn is_packaged(file_name: &str) -> bool {
    if EXCLUDED_FILES.contains(&file_name) {
        return false;
    }
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| INCLUDED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}
