//! Page generation.
//!
//! The top-level driver of the pipeline. For every manifest entry with
//! `generate = true` (the manifest is the link table itself, see
//! [`crate::links`]):
//!
//! 1. derive the JSON source path from the entry's link ([`crate::paths`]);
//! 2. load the page source — a missing source silently skips the page, so
//!    partial manifests work during incremental authoring;
//! 3. expand each top-level body section independently and concatenate in
//!    list order;
//! 4. substitute `{{{key}}}` placeholders with the matching link entry's URL;
//! 5. prepend a YAML front-matter block serialized from the source's `meta`
//!    object and write the document under the output root.
//!
//! Entries are processed in sorted key order, so runs are deterministic.
//! Fatal I/O or parse errors abort the whole run; the only per-page
//! tolerance is the missing-source skip above.

use crate::links::LinkTable;
use crate::paths::derive_page_paths;
use crate::render::{Expander, Registry, RenderContext, RenderError};
use crate::section::Section;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A page's JSON source: front-matter fields plus the section list.
#[derive(Debug, Deserialize)]
pub struct PageSource {
    /// Arbitrary front-matter fields, emitted as YAML in source order.
    #[serde(default = "empty_object")]
    pub meta: Value,
    #[serde(default)]
    pub body: Vec<Section>,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// One page produced by a run.
#[derive(Debug)]
pub struct GeneratedPage {
    /// Manifest key.
    pub key: String,
    /// Manifest link the page was derived from.
    pub link: String,
    /// Output path, relative to the output root.
    pub output: PathBuf,
}

/// Result of a build or check run.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    pub pages: Vec<GeneratedPage>,
    /// Manifest keys skipped because no JSON source exists for them.
    pub skipped: Vec<String>,
}

/// Generate every manifest page and write the results under `output_root`.
pub fn generate(
    root: &Path,
    output_root: &Path,
    links: &LinkTable,
    registry: &Registry,
    front_matter: bool,
) -> Result<GenerateSummary, GenerateError> {
    run(root, output_root, links, registry, front_matter, true)
}

/// Expand every manifest page without writing anything. Surfaces the same
/// fatal errors as [`generate`].
pub fn check(
    root: &Path,
    links: &LinkTable,
    registry: &Registry,
) -> Result<GenerateSummary, GenerateError> {
    run(root, Path::new(""), links, registry, true, false)
}

fn run(
    root: &Path,
    output_root: &Path,
    links: &LinkTable,
    registry: &Registry,
    front_matter: bool,
    write: bool,
) -> Result<GenerateSummary, GenerateError> {
    let expander = Expander::new(registry, RenderContext { links, root });
    let mut summary = GenerateSummary::default();

    for (key, entry) in &links.links {
        if !entry.generate {
            continue;
        }
        let Some(paths) = derive_page_paths(&entry.link) else {
            summary.skipped.push(key.clone());
            continue;
        };
        let source_path = root.join(&paths.source);
        let raw = match fs::read_to_string(&source_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                summary.skipped.push(key.clone());
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let source: PageSource = serde_json::from_str(&raw)?;

        let document = render_page(&source, &expander, links, front_matter)?;

        if write {
            let output_path = output_root.join(&paths.output);
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, document)?;
        }
        summary.pages.push(GeneratedPage {
            key: key.clone(),
            link: entry.link.clone(),
            output: paths.output,
        });
    }
    Ok(summary)
}

/// Render one page source into its final document text.
pub fn render_page(
    source: &PageSource,
    expander: &Expander<'_>,
    links: &LinkTable,
    front_matter: bool,
) -> Result<String, GenerateError> {
    // Each top-level body item starts its own expansion (fresh visit stack):
    // cycle detection is per branch, not per document.
    let mut content = String::new();
    for section in &source.body {
        content.push_str(&expander.expand(section, &mut Vec::new())?);
    }
    let content = substitute_placeholders(&content, links);

    if !front_matter {
        return Ok(content);
    }
    let yaml = serde_yaml::to_string(&source.meta)?;
    Ok(format!("---\n{yaml}---\n{content}"))
}

/// Replace each `{{{key}}}` token with the `link` field of the matching
/// link-table entry. Unmatched keys are left verbatim; a string without
/// tokens passes through unchanged.
pub fn substitute_placeholders(content: &str, links: &LinkTable) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find("{{{") {
        let Some(len) = rest[start + 3..].find("}}}") else {
            break;
        };
        let key = &rest[start + 3..start + 3 + len];
        out.push_str(&rest[..start]);
        match links.link(key) {
            Some(entry) => out.push_str(&entry.link),
            None => {
                out.push_str("{{{");
                out.push_str(key);
                out.push_str("}}}");
            }
        }
        rest = &rest[start + 3 + len + 3..];
    }
    out.push_str(rest);
    out
}
