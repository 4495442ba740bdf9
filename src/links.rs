//! Link table loading and merging.
//!
//! The link table is the read-only lookup data every renderer shares. It is
//! built once at startup from four JSON files in the data directory and
//! never mutated afterwards:
//!
//! ```text
//! _data/
//! ├── links.json    # identifier → {label, icon, link, description, generate}
//! ├── icons.json    # branded-text labels, merged over links.json
//! ├── groups.json   # group name → ordered list of link identifiers
//! └── tables.json   # table name → ordered list of row records
//! ```
//!
//! `links.json` doubles as the page manifest: entries with `generate = true`
//! are pages this pipeline produces, everything else is hand-authored and
//! only participates in lookups.
//!
//! These files are deployment artifacts and are assumed well-formed: a
//! missing or malformed file is a fatal startup error, not a recoverable
//! condition. No schema validation is performed beyond JSON parsing.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One entry in the merged link table.
///
/// All fields are optional in the source JSON; absent fields read as empty.
/// `generate` marks manifest entries whose page content this pipeline
/// produces from a JSON source (vs hand-authored pages).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkEntry {
    pub label: String,
    pub icon: String,
    pub link: String,
    pub description: String,
    pub generate: bool,
}

/// A table row: column name → cell value, column order preserved.
pub type TableRow = serde_json::Map<String, serde_json::Value>;

/// The merged read-only link/group/table data.
#[derive(Debug, Default)]
pub struct LinkTable {
    /// Combined link + branded-text map used by renderers and placeholder
    /// substitution. Also the page manifest (see [`LinkEntry::generate`]).
    pub links: BTreeMap<String, LinkEntry>,
    /// Group name → ordered sequence of link identifiers.
    pub groups: BTreeMap<String, Vec<String>>,
    /// Table name → ordered rows for cheat-sheet style tables.
    pub tables: BTreeMap<String, Vec<TableRow>>,
}

impl LinkTable {
    /// Load and merge all data files from `data_dir`.
    ///
    /// Later sources override earlier keys (`icons.json` wins over
    /// `links.json` on collision).
    pub fn load(data_dir: &Path) -> Result<Self, LinkError> {
        let mut links: BTreeMap<String, LinkEntry> = read_json(&data_dir.join("links.json"))?;
        let labels: BTreeMap<String, LinkEntry> = read_json(&data_dir.join("icons.json"))?;
        merge(&mut links, labels);

        let groups = read_json(&data_dir.join("groups.json"))?;
        let tables = read_json(&data_dir.join("tables.json"))?;

        Ok(Self {
            links,
            groups,
            tables,
        })
    }

    /// Look up a link entry by identifier.
    pub fn link(&self, id: &str) -> Option<&LinkEntry> {
        self.links.get(id)
    }

    /// Ordered identifiers of a named group; unknown groups are empty.
    pub fn group(&self, name: &str) -> &[String] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows of a named table; unknown tables are empty.
    pub fn table(&self, name: &str) -> &[TableRow] {
        self.tables.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Overlay `overlay`'s keys onto `base`, last-write-wins.
pub fn merge<V>(base: &mut BTreeMap<String, V>, overlay: BTreeMap<String, V>) {
    base.extend(overlay);
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LinkError> {
    let raw = fs::read_to_string(path).map_err(|source| LinkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LinkError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_json;
    use serde_json::json;
    use tempfile::TempDir;

    fn entry(link: &str) -> LinkEntry {
        LinkEntry {
            link: link.to_string(),
            ..LinkEntry::default()
        }
    }

    #[test]
    fn merge_is_last_write_wins() {
        let mut base = BTreeMap::from([
            ("a".to_string(), entry("/a")),
            ("b".to_string(), entry("/b")),
        ]);
        let overlay = BTreeMap::from([
            ("b".to_string(), entry("/b-new")),
            ("c".to_string(), entry("/c")),
        ]);
        merge(&mut base, overlay);
        assert_eq!(base["a"].link, "/a");
        assert_eq!(base["b"].link, "/b-new");
        assert_eq!(base["c"].link, "/c");
    }

    #[test]
    fn load_merges_icons_over_links() {
        let tmp = TempDir::new().unwrap();
        write_json(
            &tmp.path().join("links.json"),
            &json!({
                "intro": {"label": "Intro", "link": "/intro.qmd", "generate": true},
                "python": {"label": "plain", "link": "/old"}
            }),
        );
        write_json(
            &tmp.path().join("icons.json"),
            &json!({
                "python": {"label": "Python™", "icon": "snake", "link": "/python"}
            }),
        );
        write_json(&tmp.path().join("groups.json"), &json!({"start": ["intro"]}));
        write_json(
            &tmp.path().join("tables.json"),
            &json!({"ops": [{"Op": "add", "Result": 2}]}),
        );

        let table = LinkTable::load(tmp.path()).unwrap();
        assert_eq!(table.link("python").unwrap().label, "Python™");
        assert_eq!(table.link("python").unwrap().link, "/python");
        assert!(table.link("intro").unwrap().generate);
        assert_eq!(table.group("start"), ["intro".to_string()]);
        assert_eq!(table.table("ops").len(), 1);
    }

    #[test]
    fn unknown_group_and_table_read_empty() {
        let table = LinkTable::default();
        assert!(table.group("nope").is_empty());
        assert!(table.table("nope").is_empty());
    }

    #[test]
    fn missing_data_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        // No data files at all — links.json is the first miss.
        let err = LinkTable::load(tmp.path()).unwrap_err();
        assert!(matches!(err, LinkError::Io { .. }));
        assert!(err.to_string().contains("links.json"));
    }

    #[test]
    fn malformed_data_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("links.json"), "{not json").unwrap();
        let err = LinkTable::load(tmp.path()).unwrap_err();
        assert!(matches!(err, LinkError::Json { .. }));
    }

    #[test]
    fn entry_fields_default_to_empty() {
        let e: LinkEntry = serde_json::from_value(json!({"link": "/x"})).unwrap();
        assert_eq!(e.label, "");
        assert_eq!(e.icon, "");
        assert_eq!(e.description, "");
        assert!(!e.generate);
    }
}
