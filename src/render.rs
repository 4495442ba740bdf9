//! Renderer registry and the recursive document expander.
//!
//! Dispatch is a static mapping from [`SectionKind`] to a boxed
//! [`SectionRenderer`], populated by one explicit registration call at
//! startup ([`Registry::builtin`]). An unregistered or unknown `type`
//! degrades into a visible `<!-- Unsupported type: ... -->` comment rather
//! than failing the page.
//!
//! ## Expansion
//!
//! [`Expander::expand`] resolves a node's optional `json-path` fragment,
//! then dispatches the resolved node. Cycle detection uses a visit stack
//! scoped to the current path from the document root: a fragment path is
//! pushed on entry and popped on exit, so
//!
//! - a reference cycle (A includes B includes A) terminates with exactly one
//!   circular-reference comment, and
//! - two sibling branches may legitimately include the same fragment.
//!
//! A fragment path that does not exist on disk is a soft-fail: the node
//! renders from its inline fields only. A fragment that exists but fails to
//! parse is a fatal error — data files are assumed well-formed, and a parse
//! error aborts the run rather than silently dropping content.

use crate::links::LinkTable;
use crate::section::{Fields, Section, SectionKind};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shared read-only state passed into every rendering call.
///
/// Constructed once per run; renderers hold no state of their own.
pub struct RenderContext<'a> {
    /// Merged link/group/table data.
    pub links: &'a LinkTable,
    /// Base directory for resolving `json-path` and other file references.
    pub root: &'a Path,
}

/// Converts one resolved section node into a markup fragment.
///
/// `expander` and `visited` exist for renderers with nested section lists
/// (the tabbed panel); leaf renderers ignore them.
pub trait SectionRenderer {
    fn render(
        &self,
        node: &Section,
        expander: &Expander<'_>,
        visited: &mut Vec<PathBuf>,
    ) -> Result<String, RenderError>;
}

/// Plain functions are renderers. The built-in set is registered this way.
impl<F> SectionRenderer for F
where
    F: Fn(&Section, &Expander<'_>, &mut Vec<PathBuf>) -> Result<String, RenderError>,
{
    fn render(
        &self,
        node: &Section,
        expander: &Expander<'_>,
        visited: &mut Vec<PathBuf>,
    ) -> Result<String, RenderError> {
        self(node, expander, visited)
    }
}

/// Static mapping from section kind to renderer.
pub struct Registry {
    renderers: BTreeMap<SectionKind, Box<dyn SectionRenderer>>,
}

impl Registry {
    /// An empty registry. Useful for tests; production code wants
    /// [`Registry::builtin`].
    pub fn empty() -> Self {
        Self {
            renderers: BTreeMap::new(),
        }
    }

    /// A registry with every built-in renderer registered.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        crate::sections::register_builtin(&mut registry);
        registry
    }

    /// Associate a renderer with a section kind, replacing any previous one.
    pub fn register(&mut self, kind: SectionKind, renderer: Box<dyn SectionRenderer>) {
        self.renderers.insert(kind, renderer);
    }

    pub fn get(&self, kind: SectionKind) -> Option<&dyn SectionRenderer> {
        self.renderers.get(&kind).map(Box::as_ref)
    }
}

/// Recursive document expander.
pub struct Expander<'a> {
    registry: &'a Registry,
    ctx: RenderContext<'a>,
}

impl<'a> Expander<'a> {
    pub fn new(registry: &'a Registry, ctx: RenderContext<'a>) -> Self {
        Self { registry, ctx }
    }

    pub fn ctx(&self) -> &RenderContext<'a> {
        &self.ctx
    }

    /// Expand one section node into its markup fragment.
    ///
    /// `visited` is the stack of fragment paths currently being resolved on
    /// this branch. Top-level body items start with an empty stack.
    pub fn expand(
        &self,
        node: &Section,
        visited: &mut Vec<PathBuf>,
    ) -> Result<String, RenderError> {
        if let Some(reference) = node.json_path() {
            let path = self.ctx.root.join(reference);
            if visited.contains(&path) {
                return Ok(format!(
                    "\n<!-- Skipping circular reference: {reference} -->\n"
                ));
            }
            visited.push(path.clone());
            let resolved = match load_fragment(&path)? {
                Some(fragment) => node.merged_with(fragment),
                // Missing fragment: render from inline fields only.
                None => node.clone(),
            };
            let rendered = self.dispatch(&resolved, visited);
            visited.pop();
            return rendered;
        }
        self.dispatch(node, visited)
    }

    fn dispatch(
        &self,
        node: &Section,
        visited: &mut Vec<PathBuf>,
    ) -> Result<String, RenderError> {
        let renderer = node
            .tag()
            .and_then(SectionKind::from_tag)
            .and_then(|kind| self.registry.get(kind));
        match renderer {
            Some(renderer) => renderer.render(node, self, visited),
            None => Ok(format!(
                "\n<!-- Unsupported type: {} -->\n",
                node.tag().unwrap_or("none")
            )),
        }
    }
}

/// Load an external JSON fragment. Missing file → `Ok(None)` (soft-fail),
/// unreadable or malformed file → error.
fn load_fragment(path: &Path) -> Result<Option<Fields>, RenderError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Load an external JSON file into any deserializable shape, with the same
/// missing-file soft-fail as fragments. Used by the faqs and flipbook
/// renderers for their item lists.
pub(crate) fn load_json_file<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<Option<T>, RenderError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&raw)?))
}
