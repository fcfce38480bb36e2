//! User-facing summaries. The only place that writes to stdout.

use doc2latex_compile::Compiled;
use doc2latex_core::DocumentAnalysis;
use doc2latex_io::PackageSummary;

use crate::convert::ConvertReport;

const MAX_SECTIONS: usize = 8;

pub fn print_conversion(report: &ConvertReport) {
    let out = &report.output;
    let meta = &out.metadata;

    println!("=== {} ===", meta.title);
    if let Some(subtitle) = &meta.subtitle {
        println!("{subtitle}");
    }
    println!();

    println!("Analysis");
    println!("  {:<16} {}", "type", out.analysis.document_type);
    println!("  {:<16} {}", "confidence", meta.confidence);
    println!("  {:<16} {}", "author", meta.author);
    println!("  {:<16} {}", "department", meta.department);
    println!("  {:<16} {}", "classification", meta.classification);
    print_sections(&out.analysis.key_sections);
    println!();

    println!("Conversion");
    println!(
        "  {:<16} {}",
        "mode",
        if report.online { "service" } else { "offline" }
    );
    println!("  {:<16} {}", "template", meta.template);
    println!("  {:<16} {}", "enhanced", yes_no(out.enhanced));
    if !out.indicators.is_empty() {
        let fired: Vec<&str> = out.indicators.iter().map(|i| i.as_str()).collect();
        println!("  {:<16} {}", "flagged by", fired.join(", "));
    }
    println!("  {:<16} {:.1}s", "elapsed", report.elapsed_secs);
    println!();

    println!("Project");
    println!("  {:<16} {}", "main.tex", report.paths.main_tex.display());
    println!("  {:<16} {}", "analysis", report.paths.analysis_json.display());
    println!("  {:<16} {}", "content", report.paths.content_txt.display());
    println!();

    println!("Suggestions");
    for (i, s) in out.suggestions.iter().enumerate() {
        println!("  {}. {s}", i + 1);
    }
}

/// Pretty JSON, so the output can be piped.
pub fn print_analysis(analysis: &DocumentAnalysis) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(analysis)?);
    Ok(())
}

pub fn print_compiled(compiled: &Compiled) {
    println!("Compiled {} ({})", compiled.pdf.display(), compiled.method);
}

pub fn print_package(summary: &PackageSummary) {
    println!(
        "Packaged {} files into {}",
        summary.entries.len(),
        summary.archive.display()
    );
    for entry in &summary.entries {
        println!("  {entry}");
    }
}

fn print_sections(sections: &[String]) {
    if sections.is_empty() {
        return;
    }
    println!("  sections ({}):", sections.len());
    for s in sections.iter().take(MAX_SECTIONS) {
        println!("    - {s}");
    }
    if sections.len() > MAX_SECTIONS {
        println!("    ... and {} more", sections.len() - MAX_SECTIONS);
    }
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}
