//! Markdown report generation
//!
//! Writes the same content as the plain-text report, laid out as markdown
//! tables.

use crate::output::{CrawlReport, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown report file
///
/// # Arguments
///
/// * `report` - The report data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn generate_markdown_report(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    tracing::info!("Wrote markdown report to {}", output_path.display());
    Ok(())
}

/// Formats a report as markdown
pub fn format_markdown_report(report: &CrawlReport) -> String {
    let mut md = String::new();

    md.push_str("# Crawl Ledger Report\n\n");

    // Overview
    md.push_str("## Overview\n\n");
    md.push_str(&format!("- **Unique Pages**: {}\n", report.unique_pages));
    md.push_str(&format!("- **Pages Recorded**: {}\n", report.pages_recorded()));
    md.push_str(&format!("- **Subdomains**: {}\n", report.subdomains.len()));
    if let Some(updated) = report.last_updated {
        md.push_str(&format!("- **Last Updated**: {}\n", updated.to_rfc3339()));
    }
    md.push('\n');

    // Longest page
    md.push_str("## Longest Page\n\n");
    match &report.longest_page {
        Some(page) => md.push_str(&format!("{} ({} words)\n\n", page.url, page.word_count)),
        None => md.push_str("No pages recorded yet.\n\n"),
    }

    if !report.subdomains.is_empty() {
        md.push_str("## Subdomains\n\n");
        md.push_str("| Subdomain | Pages |\n");
        md.push_str("|-----------|-------|\n");
        for (subdomain, count) in &report.subdomains {
            md.push_str(&format!("| {} | {} |\n", subdomain, count));
        }
        md.push('\n');
    }

    if !report.top_words.is_empty() {
        md.push_str(&format!("## Top {} Words\n\n", report.top_words.len()));
        md.push_str("| Rank | Word | Count |\n");
        md.push_str("|------|------|-------|\n");
        for (rank, (word, count)) in report.top_words.iter().enumerate() {
            md.push_str(&format!("| {} | {} | {} |\n", rank + 1, word, count));
        }
        md.push('\n');
    }

    md
}
