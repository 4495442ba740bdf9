//! Section node model and the section kind enumeration.
//!
//! A page body is a list of section nodes: JSON objects with a required
//! `type` discriminator and renderer-specific fields. Nodes stay untyped —
//! each renderer reads the fields it understands — but the `type` tag maps
//! onto the closed [`SectionKind`] enum so dispatch is an enum lookup, not a
//! string-to-function table.
//!
//! ## External fragments
//!
//! A node may carry a `json-path` field pointing to a JSON file whose
//! top-level object is merged into the node before dispatch. The merge is
//! immutable ([`Section::merged_with`] returns a new node) and the fragment's
//! fields win over the node's inline fields: a fragment is authoritative for
//! the content it defines, the inline node only supplies what the fragment
//! leaves out.

use serde::Deserialize;
use serde_json::Value;

/// Field map of a section node. Key order is preserved (`serde_json` with
/// `preserve_order`), which matters for table column order downstream.
pub type Fields = serde_json::Map<String, Value>;

/// One JSON-described unit of page content.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Section {
    fields: Fields,
}

impl Section {
    pub fn new(fields: Fields) -> Self {
        Self { fields }
    }

    /// The raw `type` tag, if present.
    pub fn tag(&self) -> Option<&str> {
        self.str_field("type")
    }

    /// The external fragment reference, if present.
    pub fn json_path(&self) -> Option<&str> {
        self.str_field("json-path")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// String field accessor. Non-string values read as absent.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// String field with a fallback for absent keys.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.str_field(key).unwrap_or(default)
    }

    pub fn u64_field(&self, key: &str) -> Option<u64> {
        self.fields.get(key).and_then(Value::as_u64)
    }

    /// Array field accessor; absent or non-array keys read as empty.
    pub fn list(&self, key: &str) -> &[Value] {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Merge an external fragment into this node, producing the resolved
    /// node. Fragment fields override inline fields on collision.
    pub fn merged_with(&self, fragment: Fields) -> Section {
        let mut fields = self.fields.clone();
        for (key, value) in fragment {
            fields.insert(key, value);
        }
        Section { fields }
    }
}

/// Every section type the built-in registry knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SectionKind {
    Header,
    Text,
    HeaderBlock,
    CustomCallout,
    Code,
    CategoryGrid,
    PanelTabset,
    PanelTabsetTables,
    Collapsible,
    StaticTab,
    Faqs,
    ToggleAll,
    EnableThebe,
    PageQuote,
    Divider,
    Flipbook,
    QuickLinks,
    MarkdownTable,
}

impl SectionKind {
    pub const ALL: &'static [SectionKind] = &[
        SectionKind::Header,
        SectionKind::Text,
        SectionKind::HeaderBlock,
        SectionKind::CustomCallout,
        SectionKind::Code,
        SectionKind::CategoryGrid,
        SectionKind::PanelTabset,
        SectionKind::PanelTabsetTables,
        SectionKind::Collapsible,
        SectionKind::StaticTab,
        SectionKind::Faqs,
        SectionKind::ToggleAll,
        SectionKind::EnableThebe,
        SectionKind::PageQuote,
        SectionKind::Divider,
        SectionKind::Flipbook,
        SectionKind::QuickLinks,
        SectionKind::MarkdownTable,
    ];

    /// Parse a `type` tag. Unknown tags return `None` — the expander turns
    /// that into an unsupported-type comment, never an error.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "header" => SectionKind::Header,
            "text" => SectionKind::Text,
            "header-block" => SectionKind::HeaderBlock,
            "custom-callout" => SectionKind::CustomCallout,
            "code" => SectionKind::Code,
            "category-grid" => SectionKind::CategoryGrid,
            "panel-tabset" => SectionKind::PanelTabset,
            "panel-tabset-tables" => SectionKind::PanelTabsetTables,
            "collapsible" => SectionKind::Collapsible,
            "static-tab" => SectionKind::StaticTab,
            "faqs" => SectionKind::Faqs,
            "toggle-all" => SectionKind::ToggleAll,
            "enable-thebe" => SectionKind::EnableThebe,
            "page-quote" => SectionKind::PageQuote,
            "divider" => SectionKind::Divider,
            "flipbook" => SectionKind::Flipbook,
            "quick-links" => SectionKind::QuickLinks,
            "markdown-table" => SectionKind::MarkdownTable,
            _ => return None,
        })
    }

    /// The JSON `type` tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Text => "text",
            SectionKind::HeaderBlock => "header-block",
            SectionKind::CustomCallout => "custom-callout",
            SectionKind::Code => "code",
            SectionKind::CategoryGrid => "category-grid",
            SectionKind::PanelTabset => "panel-tabset",
            SectionKind::PanelTabsetTables => "panel-tabset-tables",
            SectionKind::Collapsible => "collapsible",
            SectionKind::StaticTab => "static-tab",
            SectionKind::Faqs => "faqs",
            SectionKind::ToggleAll => "toggle-all",
            SectionKind::EnableThebe => "enable-thebe",
            SectionKind::PageQuote => "page-quote",
            SectionKind::Divider => "divider",
            SectionKind::Flipbook => "flipbook",
            SectionKind::QuickLinks => "quick-links",
            SectionKind::MarkdownTable => "markdown-table",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section(value: serde_json::Value) -> Section {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn tag_roundtrips_for_every_kind() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_tag(kind.tag()), Some(*kind));
        }
    }

    #[test]
    fn unknown_tag_is_none() {
        assert_eq!(SectionKind::from_tag("carousel"), None);
        assert_eq!(SectionKind::from_tag(""), None);
    }

    #[test]
    fn field_accessors() {
        let s = section(json!({
            "type": "header",
            "level": 3,
            "text": "Hi",
            "tabs": [1, 2]
        }));
        assert_eq!(s.tag(), Some("header"));
        assert_eq!(s.u64_field("level"), Some(3));
        assert_eq!(s.str_field("text"), Some("Hi"));
        assert_eq!(s.str_or("missing", "fallback"), "fallback");
        assert_eq!(s.list("tabs").len(), 2);
        assert_eq!(s.list("missing").len(), 0);
    }

    #[test]
    fn non_string_type_reads_as_absent() {
        let s = section(json!({ "type": 7 }));
        assert_eq!(s.tag(), None);
    }

    #[test]
    fn merged_with_prefers_fragment_fields() {
        let inline = section(json!({
            "type": "text",
            "markdown": "inline copy",
            "json-path": "frag.json"
        }));
        let fragment = match json!({ "markdown": "fragment copy", "extra": 1 }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let resolved = inline.merged_with(fragment);
        assert_eq!(resolved.str_field("markdown"), Some("fragment copy"));
        assert_eq!(resolved.u64_field("extra"), Some(1));
        // Inline-only fields survive
        assert_eq!(resolved.tag(), Some("text"));
        // The original node is untouched
        assert_eq!(inline.str_field("markdown"), Some("inline copy"));
    }
}
