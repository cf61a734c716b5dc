//! JSON renderer. Field order follows the model, map order follows the
//! source.

use crate::error::Result;
use crate::model::ComponentDoc;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, docs: &[ComponentDoc]) -> Result<String> {
        let mut out = serde_json::to_string_pretty(docs)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
