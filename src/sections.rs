//! Built-in section renderers.
//!
//! Every renderer converts one resolved section node into a Quarto-flavored
//! markup fragment. The literal output — delimiter syntax, CSS class names,
//! even blank-line placement — is part of the site's templating contract:
//! the theme's CSS and scripts key off these exact strings, so renderers
//! reproduce them verbatim rather than normalizing the markup.
//!
//! Renderers are pure functions of `(node, context)`. The three exceptions
//! read external JSON lists (`faqs`, `flipbook`) or recurse through the
//! expander (`panel-tabset`). Inline script blocks are compile-time assets
//! under `static/`.

use crate::links::TableRow;
use crate::render::{load_json_file, Expander, Registry, RenderError};
use crate::section::{Section, SectionKind};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

const SCRIPT_TOGGLE_ALL: &str = include_str!("../static/toggle_all.html");
const SCRIPT_FLIPBOOK: &str = include_str!("../static/flipbook_controls.html");
const SCRIPT_THEBE: &str = include_str!("../static/thebe_activate.html");

/// Register every built-in renderer. Called once at startup by
/// [`Registry::builtin`].
pub fn register_builtin(registry: &mut Registry) {
    registry.register(SectionKind::Header, Box::new(render_header));
    registry.register(SectionKind::Text, Box::new(render_text));
    registry.register(SectionKind::HeaderBlock, Box::new(render_header_block));
    registry.register(SectionKind::CustomCallout, Box::new(render_custom_callout));
    registry.register(SectionKind::Code, Box::new(render_code));
    registry.register(SectionKind::CategoryGrid, Box::new(render_category_grid));
    registry.register(SectionKind::PanelTabset, Box::new(render_panel_tabset));
    registry.register(
        SectionKind::PanelTabsetTables,
        Box::new(render_panel_tabset_tables),
    );
    registry.register(SectionKind::Collapsible, Box::new(render_collapsible));
    registry.register(SectionKind::StaticTab, Box::new(render_static_tab));
    registry.register(SectionKind::Faqs, Box::new(render_faqs));
    registry.register(SectionKind::ToggleAll, Box::new(render_toggle_all));
    registry.register(SectionKind::EnableThebe, Box::new(render_enable_thebe));
    registry.register(SectionKind::PageQuote, Box::new(render_page_quote));
    registry.register(SectionKind::Divider, Box::new(render_divider));
    registry.register(SectionKind::Flipbook, Box::new(render_flipbook));
    registry.register(SectionKind::QuickLinks, Box::new(render_quick_links));
    registry.register(SectionKind::MarkdownTable, Box::new(render_markdown_table));
}

// ---------------------------------------------------------------------------
// Value helpers for nested objects inside section fields
// ---------------------------------------------------------------------------

fn field_str<'v>(value: &'v Value, key: &str) -> &'v str {
    value
        .as_object()
        .and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .unwrap_or("")
}

fn field_list<'v>(value: &'v Value, key: &str) -> &'v [Value] {
    value
        .as_object()
        .and_then(|o| o.get(key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Display text of a JSON value: strings verbatim, scalars via JSON
/// serialization, null as empty.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

fn render_header(
    node: &Section,
    _: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let level = node.u64_field("level").unwrap_or(2) as usize;
    let text = node.str_or("text", "");
    Ok(format!("\n{} {text}\n", "#".repeat(level)))
}

fn render_text(
    node: &Section,
    _: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    Ok(format!("\n{}\n", node.str_or("markdown", "")))
}

fn render_header_block(
    node: &Section,
    _: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let img = node.str_or("img", "");
    let name = node.str_or("h1", "");
    let subtitle = node.str_or("h2", "");
    let mut html = String::from("\n::: {.header-block}\n\n");
    html.push_str(&format!("![]({img}){{.img}}\n\n"));
    html.push_str(&format!("## {name}\n"));
    html.push_str(&format!("### {subtitle}\n"));
    html.push_str(":::\n\n");
    Ok(html)
}

fn render_custom_callout(
    node: &Section,
    _: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let callout_type = node.str_or("callout-type", "");
    let title = node.str_or("title", "");
    let text = node.str_or("text", "");
    let mut html = String::from("\n::: {.callout icon=\"none\" .custom-callout .");
    html.push_str(&format!("{callout_type} title=\"{title}\""));
    html.push_str("}\n\n");
    html.push_str(&format!("{text}\n"));
    html.push_str(":::\n\n");
    Ok(html)
}

fn render_code(
    node: &Section,
    _: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let language = node.str_or("language", "python");
    let content = node.str_or("content", "");
    Ok(format!("```{{{language}}}\n{content}\n```\n"))
}

/// Multi-style content grid. Exactly one sub-layout applies, selected by the
/// first of these keys present on the node: `categories`, `commands`,
/// `quick-links`, `text_categories`.
fn render_category_grid(
    node: &Section,
    expander: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let mut html = String::from("\n<div class=\"category-grid\">\n");

    if node.has("categories") {
        for category in node.list("categories") {
            html.push_str("<div class=\"category-card\">\n");
            html.push_str(&format!("<h3>{}</h3>\n", field_str(category, "title")));
            let items = field_list(category, "items");
            if !items.is_empty() {
                html.push_str("<ul>\n");
                for item in items {
                    html.push_str(&format!("<li>{}</li>\n", value_text(item)));
                }
                html.push_str("</ul>\n");
            }
            html.push_str("</div>\n");
        }
    } else if node.has("commands") {
        for cmd in node.list("commands") {
            html.push_str("<div class=\"category-card\">\n");
            html.push_str(&format!("<h3>{}</h3>\n", field_str(cmd, "name")));
            html.push_str(&format!("<p>{}</p>\n", field_str(cmd, "description")));
            let flags = field_list(cmd, "flags");
            if !flags.is_empty() {
                html.push_str("<ul>\n");
                for flag in flags {
                    html.push_str(&format!(
                        "<li><code>{}</code>: {}</li>\n",
                        field_str(flag, "flag"),
                        field_str(flag, "description")
                    ));
                }
                html.push_str("</ul>\n");
            }
            html.push_str("</div>\n");
        }
    } else if node.has("quick-links") {
        let links = expander.ctx().links;
        for ql in node.list("quick-links") {
            let title = field_str(ql, "title");
            let mut page_links: Vec<String> = field_list(ql, "links-list")
                .iter()
                .map(value_text)
                .collect();
            for group in field_list(ql, "page-groups") {
                page_links.extend(links.group(&value_text(group)).iter().cloned());
            }
            html.push_str("<div class=\"category-card\">\n");
            html.push_str(&format!("<h3>{title}</h3>\n"));
            html.push_str("<div class=\"quick-links\">");
            for id in &page_links {
                if let Some(entry) = links.link(id) {
                    html.push_str(&format!(
                        "<div class=\"quick-link-item\">\
                         <i class=\"fa-regular fa-{}\"></i> \
                         <strong><a href=\"{}\">{}</a></strong> → {}\
                         </div>",
                        entry.icon, entry.link, entry.label, entry.description
                    ));
                }
            }
            html.push_str("</div></div>");
        }
    } else if node.has("text_categories") {
        for category in node.list("text_categories") {
            html.push_str("<div class=\"category-card\">\n");
            html.push_str(&format!("<h3>{}</h3>\n", field_str(category, "title")));
            html.push_str(field_str(category, "text"));
            html.push_str("</div>\n");
        }
    }

    html.push_str("</div>\n");
    Ok(html)
}

/// Tabbed panel. Recurses into child sections, sharing the caller's visit
/// stack so cycle detection covers the whole path from the document root.
fn render_panel_tabset(
    node: &Section,
    expander: &Expander<'_>,
    visited: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let mut output = String::from("\n::: {.panel-tabset}\n\n");
    for tab in node.list("tabs") {
        output.push_str(&format!("## {}\n", field_str(tab, "title")));
        for child in field_list(tab, "sections") {
            if let Some(fields) = child.as_object() {
                let section = Section::new(fields.clone());
                output.push_str(&expander.expand(&section, visited)?);
            }
        }
    }
    output.push_str(":::\n");
    Ok(output)
}

fn render_collapsible(
    node: &Section,
    _: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let css_class = node.str_or("class", "");
    let mut html = format!("<details class=\"{css_class}\">\n");
    html.push_str(&format!("<summary>{}</summary>\n", node.str_or("summary", "")));
    let content = node.str_or("content", "");
    if !content.is_empty() {
        html.push_str(&format!("{content}\n\n"));
    }
    let code = node.str_or("code", "");
    if !code.is_empty() {
        let language = node.str_or("language", "python");
        html.push_str(&format!("\n```{language}\n{code}\n```\n"));
    }
    html.push_str("</details>\n\n");
    Ok(html)
}

fn render_static_tab(
    node: &Section,
    _: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let css_class = node.str_or("class", "tab-card static-tab");
    let mut html = format!("<div class=\"{css_class}\">\n");
    let content = node.str_or("content", "");
    if !content.is_empty() {
        html.push_str(&format!("{content}\n\n"));
    }
    let code = node.str_or("code", "");
    if !code.is_empty() {
        html.push_str(&format!("```python\n{code}\n```\n"));
    }
    html.push_str("</div>\n\n");
    Ok(html)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FaqItem {
    question: String,
    answer: String,
}

/// FAQ list loaded from an external JSON file of question/answer pairs.
/// A missing file renders as an empty list.
fn render_faqs(
    node: &Section,
    expander: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let path = expander.ctx().root.join(node.str_or("items_path", ""));
    let items: Vec<FaqItem> = load_json_file(&path)?.unwrap_or_default();
    let mut html = String::new();
    for item in &items {
        html.push_str(&format!(
            "<h3 id=\"{q}\" class=\"visually-hidden\">{q}</h3>\n",
            q = item.question
        ));
        html.push_str(&format!(
            "<details>\n<summary class=\"faq-summary\">{}</summary>\n\n{}\n\n</details>\n\n",
            item.question, item.answer
        ));
    }
    Ok(html)
}

fn render_toggle_all(
    node: &Section,
    _: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let mut html = format!(
        "\n<button class=\"toggle-all-button\" onclick=\"toggleAll()\">{}</button>\n\n",
        node.str_or("text", "")
    );
    html.push_str(SCRIPT_TOGGLE_ALL);
    html.push_str("\n\n");
    Ok(html)
}

fn render_enable_thebe(
    _: &Section,
    _: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let mut html = String::from("<div id=\"thebe-wrapper\" style=\"margin: 1em 0;\">\n");
    html.push_str(
        "  <button id=\"enable-thebe\" class=\"toggle-thebe-btn\">🔁 Enable Interactivity</button>\n",
    );
    html.push_str(
        "  <span id=\"thebe-status\" style=\"margin-left: 1em; font-weight: bold; color: #555;\">\n",
    );
    html.push_str("    Thebe: Not activated\n");
    html.push_str("  </span>\n");
    html.push_str("</div>\n\n");
    html.push_str(SCRIPT_THEBE);
    html.push_str("\n\n");
    Ok(html)
}

fn render_page_quote(
    node: &Section,
    _: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    Ok(format!(
        "\n<div class=\"page-quote\">\n{}\n</div>\n\n",
        node.str_or("text", "")
    ))
}

fn render_divider(
    _: &Section,
    _: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    Ok("\n<hr class=\"page-divider\">\n".to_string())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FlipbookData {
    images: Vec<FlipbookImage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FlipbookImage {
    src: String,
    caption: String,
}

/// Image flipbook: emits an inline data script, an embed directive for the
/// shared flipbook markup, and the control script.
fn render_flipbook(
    node: &Section,
    expander: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let path = expander.ctx().root.join(node.str_or("img-json-path", ""));
    let data: FlipbookData = load_json_file(&path)?.unwrap_or_default();

    let mut html = String::from("\n```{=html}\n<script>\nconst flipData = [\n");
    let entries: Vec<String> = data
        .images
        .iter()
        .map(|img| format!("  {{ src: \"{}\", caption: \"{}\" }}", img.src, img.caption))
        .collect();
    html.push_str(&entries.join(",\n"));
    html.push_str("\n];\n</script>\n```\n\n\n");
    html.push_str("```{=html}\n{{< include /assets/html/flipbook.html >}}\n```\n\n");
    html.push_str(SCRIPT_FLIPBOOK);
    html.push_str("\n\n");
    Ok(html)
}

/// Inline quick-links list built from link identifiers and named groups.
fn render_quick_links(
    node: &Section,
    expander: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let links = expander.ctx().links;
    let mut page_links: Vec<String> = node.list("page-list").iter().map(value_text).collect();
    for group in node.list("page-groups") {
        page_links.extend(links.group(&value_text(group)).iter().cloned());
    }

    let mut lines = vec![
        ":::{.quick-links}".to_string(),
        String::new(),
        "<ul>".to_string(),
    ];
    for id in &page_links {
        if let Some(entry) = links.link(id) {
            let url = if entry.link.is_empty() {
                "#"
            } else {
                entry.link.as_str()
            };
            let icon = if entry.icon.is_empty() {
                "window-maximize"
            } else {
                entry.icon.as_str()
            };
            lines.push(format!(
                "<li class=\"quick-link-item\">{{{{< fa regular {icon} >}}}} \
                 <strong><a href=\"{url}\">{label}</a></strong> → {description}</li>",
                label = entry.label,
                description = entry.description
            ));
        }
    }
    lines.push("</ul>".to_string());
    lines.push(String::new());
    lines.push(":::".to_string());
    Ok(lines.join("\n") + "\n")
}

fn render_markdown_table(
    node: &Section,
    expander: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let rows = expander.ctx().links.table(node.str_or("table-name", ""));
    let mut html = String::from("\n<div class=\"table-cheatsheet\">\n");
    html.push_str(&format_markdown_table(rows));
    html.push_str("\n\n");
    html.push_str("</div>\n\n");
    Ok(html)
}

/// Tabbed panel of named tables.
fn render_panel_tabset_tables(
    node: &Section,
    expander: &Expander<'_>,
    _: &mut Vec<PathBuf>,
) -> Result<String, RenderError> {
    let links = expander.ctx().links;
    let mut output = String::from("\n::: {.panel-tabset}\n\n");
    for name in node.list("table-names") {
        let name = value_text(name);
        output.push_str(&format!("#### {name}\n"));
        output.push_str("::: {.table-cheatsheet}\n");
        output.push_str(&format_markdown_table(links.table(&name)));
        output.push('\n');
        output.push_str(":::\n");
    }
    output.push_str(":::\n");
    Ok(output)
}

/// Pipe-table markup from uniform row records. Column order comes from the
/// first row; missing cells render empty. An empty row set renders nothing.
pub fn format_markdown_table(rows: &[TableRow]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let header_line = format!("| {} |", headers.join(" | "));
    let separator_line = format!(
        "| {} |",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join(" | ")
    );
    let mut lines = vec![header_line, separator_line];
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(value_text).unwrap_or_default())
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }
    lines.join("\n")
}
