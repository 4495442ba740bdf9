//! Shared test utilities for the coursegen test suite.
//!
//! Provides fixture builders for the data directory and page sources, plus
//! single-node expansion helpers so renderer tests stay one-liners.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_site();
//! let links = LinkTable::load(&tmp.path().join("_data")).unwrap();
//!
//! let out = expand_with(&links, tmp.path(), json!({"type": "divider"})).unwrap();
//! assert_eq!(out, "\n<hr class=\"page-divider\">\n");
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

use crate::links::{LinkEntry, LinkTable, TableRow};
use crate::render::{Expander, Registry, RenderContext, RenderError};
use crate::section::Section;
use serde_json::{json, Value};

/// Write a JSON value to `path`, creating parent directories.
pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Build a [`Section`] from a JSON object literal.
pub fn section(value: Value) -> Section {
    serde_json::from_value(value).unwrap()
}

/// Expand a single node against an empty link table.
pub fn expand_one(root: &Path, value: Value) -> Result<String, RenderError> {
    let links = LinkTable::default();
    expand_with(&links, root, value)
}

/// Expand a single node with the builtin registry and the given link table.
pub fn expand_with(links: &LinkTable, root: &Path, value: Value) -> Result<String, RenderError> {
    let registry = Registry::builtin();
    let expander = Expander::new(&registry, RenderContext { links, root });
    expander.expand(&section(value), &mut Vec::new())
}

fn entry(label: &str, icon: &str, link: &str, description: &str) -> LinkEntry {
    LinkEntry {
        label: label.to_string(),
        icon: icon.to_string(),
        link: link.to_string(),
        description: description.to_string(),
        generate: false,
    }
}

/// An in-memory link table with a few links, one group, and one table.
pub fn sample_links() -> LinkTable {
    let links = BTreeMap::from([
        (
            "intro".to_string(),
            entry("Intro", "rocket", "/intro.qmd", "Start page"),
        ),
        (
            "python".to_string(),
            entry("Python", "snake", "/python.qmd", "Language notes"),
        ),
        ("bare".to_string(), entry("Bare", "", "", "")),
    ]);
    let groups = BTreeMap::from([(
        "core".to_string(),
        vec!["python".to_string(), "intro".to_string()],
    )]);
    let ops: Vec<TableRow> = serde_json::from_value(json!([
        {"Op": "add", "Result": 2},
        {"Op": "sub", "Result": 0}
    ]))
    .unwrap();
    let tables = BTreeMap::from([("ops".to_string(), ops)]);
    LinkTable {
        links,
        groups,
        tables,
    }
}

/// Lay out a complete fixture site in a temp directory:
///
/// ```text
/// <tmp>/
/// ├── config.toml
/// ├── _data/{links,icons,groups,tables}.json
/// └── pages/_json/{intro,commands}.json
/// ```
///
/// The manifest generates `/pages/intro.qmd` and `/pages/commands.qmd`, and
/// lists one hand-authored page (`generate` absent) plus one generated page
/// with no JSON source (`orphan`, which a build must skip).
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("_data");

    write_json(
        &data.join("links.json"),
        &json!({
            "intro": {
                "label": "Intro", "icon": "rocket", "link": "/pages/intro.qmd",
                "description": "Start page", "generate": true
            },
            "commands": {
                "label": "Commands", "icon": "terminal", "link": "/pages/commands.qmd",
                "description": "CLI cheat sheet", "generate": true
            },
            "orphan": {
                "label": "Orphan", "link": "/pages/orphan.qmd", "generate": true
            },
            "handmade": {
                "label": "Handmade", "link": "/pages/handmade.qmd",
                "description": "Authored by hand"
            }
        }),
    );
    write_json(
        &data.join("icons.json"),
        &json!({
            "python": {"label": "Python™", "icon": "snake", "link": "https://python.org"}
        }),
    );
    write_json(
        &data.join("groups.json"),
        &json!({"core": ["intro", "commands"]}),
    );
    write_json(
        &data.join("tables.json"),
        &json!({"ops": [{"Op": "add", "Result": 2}]}),
    );

    write_json(
        &tmp.path().join("pages/_json/intro.json"),
        &json!({
            "meta": {"title": "Introduction", "subtitle": "Start here"},
            "body": [
                {"type": "header", "level": 2, "text": "Welcome"},
                {"type": "text", "markdown": "See {{{python}}} for the docs."},
                {"type": "quick-links", "page-groups": ["core"]}
            ]
        }),
    );
    write_json(
        &tmp.path().join("pages/_json/commands.json"),
        &json!({
            "meta": {"title": "Commands"},
            "body": [
                {"type": "markdown-table", "table-name": "ops"}
            ]
        }),
    );

    std::fs::write(tmp.path().join("config.toml"), "data_dir = \"_data\"\n").unwrap();
    tmp
}
