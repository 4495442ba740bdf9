//! # Coursegen
//!
//! A manifest-driven page generator for static course sites. Pages are
//! described as JSON — a `meta` object for front matter and a `body` list of
//! typed section nodes — and rendered into Quarto-flavored markdown
//! documents, with cross-page links, icon labels, link groups, and data
//! tables resolved from a shared read-only link table.
//!
//! # Architecture: One Pass, Four Layers
//!
//! ```text
//! 1. Link Table   _data/*.json   →  merged lookup maps (built once, read-only)
//! 2. Expander     body sections  →  fragment resolution + cycle guard
//! 3. Registry     section node   →  markup fragment (one renderer per type)
//! 4. Generator    manifest entry →  placeholder substitution + front matter + file
//! ```
//!
//! Everything is single-threaded and synchronous: every document is fully
//! regenerated from its JSON source on every invocation, in sorted manifest
//! order. There is no schema validation and no incremental rebuild — the
//! data files are deployment artifacts and are assumed well-formed.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`links`] | Loads and merges the link/icon/group/table JSON files into the read-only Link Table |
//! | [`section`] | Section node model, the `SectionKind` enum, and immutable fragment merging |
//! | [`render`] | Renderer registry, render context, and the recursive document expander |
//! | [`sections`] | The built-in renderers — their literal output is the site's templating contract |
//! | [`paths`] | Manifest link → JSON source path and output path derivation |
//! | [`generate`] | Top-level driver: manifest iteration, placeholder substitution, front matter, file writes |
//! | [`config`] | Optional `config.toml` loading, validation, and the stock config printer |
//! | [`output`] | CLI output formatting — pure `format_*` functions with `print_*` wrappers |
//!
//! # Failure Policy
//!
//! Partial output beats total failure at page and node granularity, but the
//! foundational data gets no tolerance:
//!
//! - **Fatal**: missing or malformed link/group/table files, malformed page
//!   sources or fragments, unreadable output paths.
//! - **Per-node soft-fail**: unregistered section type (visible comment),
//!   circular fragment reference (visible comment), missing fragment file
//!   (node renders from inline fields), unmatched placeholder (left
//!   verbatim).
//! - **Per-page soft-fail**: manifest entry with no JSON source (page
//!   skipped, run continues).

pub mod config;
pub mod generate;
pub mod links;
pub mod output;
pub mod paths;
pub mod render;
pub mod section;
pub mod sections;

#[cfg(test)]
pub(crate) mod test_helpers;
