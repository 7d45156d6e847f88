//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;
pub mod text;

use anyhow::{anyhow, Result};
use gentag::model::{DocStruct, ElementGroup};

/// Trait for rendering an outline into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &DocStruct) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "text" | "txt" => Ok(Box::new(text::TextRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use text, markdown, or json",
            format
        )),
    }
}

/// Heading for an element group: its description, or the raw key.
fn group_title<'a>(key: &'a str, group: &'a ElementGroup) -> &'a str {
    if group.description.is_empty() {
        key
    } else {
        &group.description
    }
}
