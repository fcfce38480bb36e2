//! Compile `main.tex` with whichever TeX front end is installed.
//!
//! Methods are tried in order until one exits cleanly *and* leaves a
//! `main.pdf` behind. Every command runs inside the project directory and
//! is killed once the deadline passes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use doc2latex_core::Config;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::CompileError;

const MAIN_TEX: &str = "main.tex";
const MAIN_PDF: &str = "main.pdf";
/// Lines of compiler output kept in [`CompileError::Failed`].
const OUTPUT_TAIL_LINES: usize = 20;

/// One way of producing a PDF: `program args...` run `passes` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Method {
    pub name: &'static str,
    pub program: &'static str,
    pub args: &'static [&'static str],
    pub passes: u8,
}

pub const METHODS: [Method; 3] = [
    // Second pass resolves cross-references.
    Method {
        name: "pdflatex",
        program: "pdflatex",
        args: &["-interaction=nonstopmode", MAIN_TEX],
        passes: 2,
    },
    Method {
        name: "latexmk-pdflatex",
        program: "latexmk",
        args: &["-pdf", "-pdflatex=pdflatex", "-cd", MAIN_TEX],
        passes: 1,
    },
    Method {
        name: "latexmk",
        program: "latexmk",
        args: &["-pdf", "-cd", MAIN_TEX],
        passes: 1,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub pdf: PathBuf,
    pub method: &'static str,
}

pub struct Compiler {
    deadline: Duration,
    methods: Vec<Method>,
}

impl Compiler {
    pub fn new(deadline: Duration) -> Self {
        Self {
            deadline,
            methods: METHODS.to_vec(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Duration::from_secs(config.compile_timeout_secs))
    }

    /// Replace the method list. An empty list makes every compile fail with
    /// [`CompileError::NoArtifact`].
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    /// Compile `project/main.tex`. Returns the error of the last method
    /// tried when none of them succeeds.
    pub async fn compile(&self, project: &Path) -> Result<Compiled, CompileError> {
        if !project.join(MAIN_TEX).is_file() {
            return Err(CompileError::MissingMainTex(project.to_path_buf()));
        }
        let pdf = project.join(MAIN_PDF);

        let mut last = CompileError::NoArtifact;
        for method in &self.methods {
            match self.run_method(project, method).await {
                Ok(()) if pdf.is_file() => {
                    info!(
                        method = method.name,
                        pdf = %pdf.display(),
                        "compilation succeeded"
                    );
                    return Ok(Compiled {
                        pdf,
                        method: method.name,
                    });
                }
                Ok(()) => {
                    warn!(method = method.name, "no main.pdf produced, trying next method");
                    last = CompileError::NoArtifact;
                }
                Err(e) => {
                    warn!(method = method.name, error = %e, "compilation method failed");
                    last = e;
                }
            }
        }
        Err(last)
    }

    async fn run_method(&self, dir: &Path, method: &Method) -> Result<(), CompileError> {
        for pass in 1..=method.passes {
            debug!(method = method.name, pass, "running compiler");
            let output = Command::new(method.program)
                .args(method.args)
                .current_dir(dir)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output();

            let output = match timeout(self.deadline, output).await {
                Err(_) => {
                    return Err(CompileError::Timeout {
                        method: method.name,
                        secs: self.deadline.as_secs(),
                    });
                }
                Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                    return Err(CompileError::MissingBinary(method.program.to_string()));
                }
                Ok(result) => result?,
            };

            if !output.status.success() {
                // TeX reports errors on stdout; stderr is usually empty.
                let stderr = if output.stderr.iter().all(u8::is_ascii_whitespace) {
                    tail(&String::from_utf8_lossy(&output.stdout))
                } else {
                    tail(&String::from_utf8_lossy(&output.stderr))
                };
                return Err(CompileError::Failed {
                    method: method.name,
                    stderr,
                });
            }
        }
        Ok(())
    }
}

fn tail(output: &str) -> String {
    let lines: Vec<&str> = output.trim_end().lines().collect();
    let start = lines.len().saturating_sub(OUTPUT_TAIL_LINES);
    lines[start..].join("\n")
}
