//! Renderer module: trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::error::{Error, Result};
use crate::model::ComponentDoc;

/// Turns a list of component docs into one output document.
pub trait Renderer {
    fn render(&self, docs: &[ComponentDoc]) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}
