//! GitHub-flavored markdown renderer.
//!
//! One `##` section per component: description, a tag list, then a props
//! table.

use crate::error::Result;
use crate::model::{ComponentDoc, PropItem, PropItemType, TagMap};
use crate::render::Renderer;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, docs: &[ComponentDoc]) -> Result<String> {
        let sections: Vec<String> = docs.iter().map(render_component).collect();
        Ok(sections.join("\n"))
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_component(doc: &ComponentDoc) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("## {}\n", doc.export_name));

    if !doc.description.is_empty() {
        lines.push(doc.description.clone());
        lines.push(String::new());
    }

    if !doc.tags.is_empty() {
        lines.extend(render_tags(&doc.tags));
        lines.push(String::new());
    }

    if !doc.props.is_empty() {
        lines.push("### Props\n".to_string());
        lines.push("| Name | Type | Required | Default | Description |".to_string());
        lines.push("|------|------|----------|---------|-------------|".to_string());
        for prop in doc.props.values() {
            lines.push(render_prop_row(prop));
        }
        lines.push(String::new());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// `* **@name** value`, one per tag.
fn render_tags(tags: &TagMap) -> Vec<String> {
    tags.iter()
        .map(|(key, value)| {
            if value.is_empty() {
                format!("* **@{}**", key)
            } else {
                format!("* **@{}** {}", key, value.replace('\n', "\n  "))
            }
        })
        .collect()
}

fn render_prop_row(prop: &PropItem) -> String {
    let default = prop
        .default_value
        .as_ref()
        .map(|d| code(&d.value))
        .unwrap_or_default();

    format!(
        "| {} | {} | {} | {} | {} |",
        code(&prop.name),
        code(type_text(&prop.ty)),
        if prop.required { "yes" } else { "no" },
        default,
        cell(&prop.description),
    )
}

/// Enums show their source text. Their `name` is just `enum`.
fn type_text(ty: &PropItemType) -> &str {
    ty.raw.as_deref().unwrap_or(&ty.name)
}

fn code(text: &str) -> String {
    format!("`{}`", cell(text))
}

/// Escape a value for use inside a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace("\r\n", "<br>").replace('\n', "<br>")
}
