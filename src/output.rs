//! CLI output formatting for build and check runs.
//!
//! Output is information-centric: the primary display for every page is its
//! manifest key and where it landed, with skips listed afterwards so a
//! partial manifest is visible at a glance.
//!
//! ```text
//! 001 commands → pages/commands.qmd
//! 002 intro → pages/intro.qmd
//! Skipped (no JSON source): orphan
//!
//! Generated 2 pages, skipped 1
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::generate::GenerateSummary;
use crate::links::LinkTable;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Lines describing what a run produced (or would produce, for check).
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, page) in summary.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(idx + 1),
            page.key,
            page.output.display()
        ));
    }
    if !summary.skipped.is_empty() {
        lines.push(format!(
            "Skipped (no JSON source): {}",
            summary.skipped.join(", ")
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, skipped {}",
        summary.pages.len(),
        summary.skipped.len()
    ));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{line}");
    }
}

/// One-line inventory of the loaded link data.
pub fn format_link_summary(links: &LinkTable) -> Vec<String> {
    vec![format!(
        "Loaded {} links, {} groups, {} tables",
        links.links.len(),
        links.groups.len(),
        links.tables.len()
    )]
}

pub fn print_link_summary(links: &LinkTable) {
    for line in format_link_summary(links) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedPage;
    use crate::test_helpers::sample_links;
    use std::path::PathBuf;

    fn page(key: &str, output: &str) -> GeneratedPage {
        GeneratedPage {
            key: key.to_string(),
            link: format!("/{output}"),
            output: PathBuf::from(output),
        }
    }

    #[test]
    fn generate_output_lists_pages_in_order() {
        let summary = GenerateSummary {
            pages: vec![page("commands", "pages/commands.qmd"), page("intro", "pages/intro.qmd")],
            skipped: vec!["orphan".to_string()],
        };
        let lines = format_generate_output(&summary);
        assert_eq!(lines[0], "001 commands → pages/commands.qmd");
        assert_eq!(lines[1], "002 intro → pages/intro.qmd");
        assert_eq!(lines[2], "Skipped (no JSON source): orphan");
        assert_eq!(lines.last().unwrap(), "Generated 2 pages, skipped 1");
    }

    #[test]
    fn generate_output_omits_skip_line_when_nothing_skipped() {
        let summary = GenerateSummary {
            pages: vec![page("intro", "pages/intro.qmd")],
            skipped: vec![],
        };
        let lines = format_generate_output(&summary);
        assert!(!lines.iter().any(|l| l.starts_with("Skipped")));
        assert_eq!(lines.last().unwrap(), "Generated 1 pages, skipped 0");
    }

    #[test]
    fn link_summary_counts() {
        let links = sample_links();
        assert_eq!(
            format_link_summary(&links),
            vec!["Loaded 3 links, 1 groups, 1 tables".to_string()]
        );
    }
}
