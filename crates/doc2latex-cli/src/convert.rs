//! Convert command: extract text, run the pipeline, write the project.

use std::time::Instant;

use anyhow::Context;
use doc2latex_ai::ConversionOutput;
use doc2latex_core::{Config, Overrides};
use doc2latex_io::{Project, ProjectPaths, write_project};
use tracing::warn;

use crate::ConvertArgs;

pub struct ConvertReport {
    pub output: ConversionOutput,
    pub paths: ProjectPaths,
    /// Whether the text-understanding service was used.
    pub online: bool,
    pub elapsed_secs: f64,
}

pub async fn run(config: &Config, args: &ConvertArgs) -> anyhow::Result<ConvertReport> {
    let start = Instant::now();

    let raw = doc2latex_io::extract_text(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    eprintln!(
        "  Read {} chars from {}",
        raw.chars().count(),
        args.input.display()
    );

    let overrides = Overrides {
        title: args.title.clone(),
        author: args.author.clone(),
        subtitle: args.subtitle.clone(),
        template: args.template.clone(),
    };

    let online = !args.offline && config.has_credentials();
    let output = if online {
        eprintln!("  Converting with {} ...", config.classification_model);
        crate::converter(config)?.convert(&raw, &overrides).await
    } else {
        if !args.offline {
            warn!("no API key configured, converting offline");
        }
        doc2latex_ai::convert_offline(&raw, &overrides)
    }
    .with_context(|| format!("converting {}", args.input.display()))?;

    let original_file = args.input.file_name().and_then(|n| n.to_str());
    let paths = write_project(
        &args.output,
        &Project {
            latex: &output.latex,
            content: &output.content,
            analysis: &output.analysis,
            metadata: &output.metadata,
            suggestions: &output.suggestions,
            enhanced: output.enhanced,
            original_file,
        },
    )
    .with_context(|| format!("writing project to {}", args.output.display()))?;

    Ok(ConvertReport {
        output,
        paths,
        online,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args(input: PathBuf, output: PathBuf) -> ConvertArgs {
        ConvertArgs {
            input,
            output,
            title: Some("Leave Policy".into()),
            author: None,
            subtitle: None,
            template: None,
            build: false,
            offline: true,
        }
    }

    #[tokio::test]
    async fn offline_conversion_writes_project() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("memo.txt");
        std::fs::write(&input, "OFFICE MEMORANDUM\nSubject: Leave & travel\nBody text").unwrap();
        let out = dir.path().join("project");

        let report = run(&Config::default(), &args(input, out.clone())).await.unwrap();
        assert!(!report.online);
        assert!(!report.output.enhanced);
        assert_eq!(report.output.metadata.title, "Leave Policy");
        assert_eq!(report.paths.main_tex, out.join("main.tex"));

        let tex = std::fs::read_to_string(&report.paths.main_tex).unwrap();
        assert!(tex.contains("Leave \\& travel"));
        let json = std::fs::read_to_string(&report.paths.analysis_json).unwrap();
        assert!(json.contains("\"original_file\": \"memo.txt\""));
    }

    #[tokio::test]
    async fn missing_credentials_fall_back_to_offline() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notice.txt");
        std::fs::write(&input, "NOTICE\nAll staff").unwrap();
        let mut a = args(input, dir.path().join("out"));
        a.offline = false;

        let report = run(&Config::default(), &a).await.unwrap();
        assert!(!report.online);
        assert!(report.paths.main_tex.is_file());
    }

    #[tokio::test]
    async fn blank_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blank.txt");
        std::fs::write(&input, "  \n\n ").unwrap();
        let out = dir.path().join("out");

        assert!(run(&Config::default(), &args(input, out.clone())).await.is_err());
        assert!(!out.exists());
    }
}
