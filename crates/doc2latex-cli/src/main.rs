mod convert;
mod display;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use doc2latex_ai::{Converter, OpenAiClient};
use doc2latex_compile::Compiler;
use doc2latex_core::Config;

#[derive(Parser)]
#[command(name = "doc2latex")]
#[command(author, version, about = "Turn office documents into typeset LaTeX projects", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API key for the text-understanding service
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, global = true, env = "DOC2LATEX_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a document into a LaTeX project directory
    Convert(ConvertArgs),

    /// Classify a document and print the analysis as JSON
    Analyze {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Compile an existing project's main.tex to PDF
    Build {
        #[arg(short, long)]
        project: PathBuf,
    },

    /// Zip a project directory for upload
    Package {
        #[arg(short, long)]
        src: PathBuf,

        #[arg(short, long)]
        zip: PathBuf,

        /// Refuse to package a directory without main.tex
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Input document (.txt, .docx or .pdf)
    #[arg(short, long)]
    input: PathBuf,

    /// Output project directory
    #[arg(short, long)]
    output: PathBuf,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    author: Option<String>,

    #[arg(long)]
    subtitle: Option<String>,

    /// Template id, or "auto" for the classifier's suggestion
    #[arg(long)]
    template: Option<String>,

    /// Compile main.tex after writing the project
    #[arg(long)]
    build: bool,

    /// Skip the text-understanding service entirely
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, online = config.has_credentials(), "configuration loaded");

    match cli.command {
        Command::Convert(args) => {
            let report = convert::run(&config, &args).await?;
            display::print_conversion(&report);
            if args.build {
                build(&config, &report.paths.root).await?;
            }
        }
        Command::Analyze { input } => {
            if !config.has_credentials() {
                bail!("analyze needs an API key (--api-key or OPENAI_API_KEY)");
            }
            let raw = doc2latex_io::extract_text(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let analysis = converter(&config)?
                .analyze(&raw)
                .await
                .with_context(|| format!("analysing {}", input.display()))?;
            display::print_analysis(&analysis)?;
        }
        Command::Build { project } => build(&config, &project).await?,
        Command::Package { src, zip, validate } => {
            let summary = doc2latex_io::package_project(&src, &zip, validate)
                .with_context(|| format!("packaging {}", src.display()))?;
            display::print_package(&summary);
        }
    }
    Ok(())
}

/// Defaults, then the config file, then flags and environment.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => Config::default(),
    };
    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    Ok(config)
}

fn converter(config: &Config) -> anyhow::Result<Converter> {
    let client = OpenAiClient::from_config(config).context("building API client")?;
    Ok(Converter::new(config, Arc::new(client)))
}

async fn build(config: &Config, project: &Path) -> anyhow::Result<()> {
    eprintln!("  Compiling {} ...", project.display());
    let compiled = Compiler::from_config(config)
        .compile(project)
        .await
        .with_context(|| format!("compiling {}", project.display()))?;
    display::print_compiled(&compiled);
    Ok(())
}
