//! Centralized path derivation for the manifest link convention.
//!
//! A manifest entry identifies a page only by its output link, e.g.
//! `/pages/intro.qmd`. Everything else is derived: the page's JSON source
//! lives under a sibling `_json` directory with the same stem, and the
//! output lands at the link path itself (relative to the output root).
//!
//! - `/pages/intro.qmd` → source `pages/_json/intro.json`, output `pages/intro.qmd`
//! - `/a/b` → source `a/_json/b.json`, output `a/b`
//! - `top.qmd` → source `_json/top.json`, output `top.qmd`

use std::path::{Path, PathBuf};

/// Derived relative paths for one manifest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePaths {
    /// JSON source, relative to the content root.
    pub source: PathBuf,
    /// Rendered document, relative to the output root.
    pub output: PathBuf,
}

/// Derive source and output paths from a manifest link.
///
/// Returns `None` for empty links (after stripping slashes) — such entries
/// have nothing to generate and are skipped.
pub fn derive_page_paths(link: &str) -> Option<PagePaths> {
    let rel = link.trim_matches('/');
    if rel.is_empty() {
        return None;
    }
    let rel = Path::new(rel);
    let stem = rel.file_stem()?.to_string_lossy();
    let parent = rel.parent().unwrap_or_else(|| Path::new(""));
    Some(PagePaths {
        source: parent.join("_json").join(format!("{stem}.json")),
        output: rel.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_link_with_extension() {
        let p = derive_page_paths("/pages/intro.qmd").unwrap();
        assert_eq!(p.source, PathBuf::from("pages/_json/intro.json"));
        assert_eq!(p.output, PathBuf::from("pages/intro.qmd"));
    }

    #[test]
    fn nested_link_without_extension() {
        let p = derive_page_paths("/a/b").unwrap();
        assert_eq!(p.source, PathBuf::from("a/_json/b.json"));
        assert_eq!(p.output, PathBuf::from("a/b"));
    }

    #[test]
    fn top_level_link() {
        let p = derive_page_paths("top.qmd").unwrap();
        assert_eq!(p.source, PathBuf::from("_json/top.json"));
        assert_eq!(p.output, PathBuf::from("top.qmd"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let p = derive_page_paths("/docs/setup/").unwrap();
        assert_eq!(p.source, PathBuf::from("docs/_json/setup.json"));
        assert_eq!(p.output, PathBuf::from("docs/setup"));
    }

    #[test]
    fn empty_link_has_no_paths() {
        assert_eq!(derive_page_paths(""), None);
        assert_eq!(derive_page_paths("///"), None);
    }
}
