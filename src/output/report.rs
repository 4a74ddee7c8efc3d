//! Plain-text report rendering

use crate::output::CrawlReport;

/// Formats a report as plain text
pub fn format_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Report ===\n\n");
    out.push_str(&format!("Unique pages: {}\n", report.unique_pages));
    if let Some(updated) = report.last_updated {
        out.push_str(&format!("Last updated: {}\n", updated.to_rfc3339()));
    }
    out.push('\n');

    out.push_str(&format!("Subdomains ({}):\n", report.subdomains.len()));
    for (subdomain, count) in &report.subdomains {
        out.push_str(&format!("  {}, {}\n", subdomain, count));
    }
    out.push('\n');

    match &report.longest_page {
        Some(page) => out.push_str(&format!(
            "Longest page: {} ({} words)\n",
            page.url, page.word_count
        )),
        None => out.push_str("Longest page: none recorded\n"),
    }
    out.push('\n');

    out.push_str(&format!("Top {} words:\n", report.top_words.len()));
    for (rank, (word, count)) in report.top_words.iter().enumerate() {
        out.push_str(&format!("  {:>3}. {} ({})\n", rank + 1, word, count));
    }

    out
}

/// Prints a report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}
