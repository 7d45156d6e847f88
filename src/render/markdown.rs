//! GitHub-flavored markdown outline.

use crate::render::{group_title, Renderer};
use anyhow::Result;
use gentag::model::*;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &DocStruct) -> Result<String> {
        let mut lines: Vec<String> = Vec::new();

        if !doc.classes().is_empty() {
            lines.push("## Classes\n".to_string());
            for class in doc.classes() {
                lines.push(format!("### {}\n", class.name()));
                lines.push(format!("_Line {}_\n", class.line() + 1));
                for var in class.variables() {
                    lines.push(item(var.name(), var.line()));
                }
                for method in class.methods() {
                    lines.push(item(&format!("{}()", method.name()), method.line()));
                }
                if !class.variables().is_empty() || !class.methods().is_empty() {
                    lines.push(String::new());
                }
            }
        }

        if !doc.functions().is_empty() {
            lines.push("## Functions\n".to_string());
            for func in doc.functions() {
                lines.push(item(&format!("{}()", func.name()), func.line()));
            }
            lines.push(String::new());
        }

        if !doc.variables().is_empty() {
            lines.push("## Variables\n".to_string());
            for var in doc.variables() {
                lines.push(item(var.name(), var.line()));
            }
            lines.push(String::new());
        }

        for (key, group) in doc.elements_by_priority() {
            lines.push(format!("## {}\n", group_title(key, group)));
            for element in &group.items {
                lines.push(item(element.name(), element.line()));
            }
            lines.push(String::new());
        }

        Ok(lines.join("\n"))
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn item(name: &str, line: usize) -> String {
    format!("* `{}` (line {})", name.replace('`', "\\`"), line + 1)
}
