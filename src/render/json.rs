//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the outline model directly, so line numbers stay zero-based.

use crate::render::Renderer;
use anyhow::{Context, Result};
use gentag::model::*;
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct Outline<'a> {
    classes: &'a [Class],
    functions: &'a [Function],
    variables: &'a [Variable],
    elements: Vec<Group<'a>>,
}

#[derive(Serialize)]
struct Group<'a> {
    category: &'a str,
    description: &'a str,
    priority: i32,
    items: &'a [Element],
}

impl Renderer for JsonRenderer {
    fn render(&self, doc: &DocStruct) -> Result<String> {
        let outline = Outline {
            classes: doc.classes(),
            functions: doc.functions(),
            variables: doc.variables(),
            elements: doc
                .element_groups()
                .map(|(category, group)| Group {
                    category,
                    description: &group.description,
                    priority: group.priority,
                    items: &group.items,
                })
                .collect(),
        };
        let mut out = serde_json::to_string_pretty(&outline).context("failed to serialize outline")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn serializes_model() {
        let mut doc = DocStruct::new();
        let mut class = Class::new("Foo", 0);
        class.add_method(Method::new("bar", 1, "Foo"));
        doc.add_class(class);
        doc.add_variable(Variable::new("x", 3));
        doc.set_element_description("package", "Packages");
        doc.add_element("package", Scope::package("P", 5));

        let out = JsonRenderer.render(&doc).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["classes"][0]["name"], "Foo");
        assert_eq!(value["classes"][0]["methods"][0]["class"], "Foo");
        assert_eq!(value["variables"][0]["line"], 3);
        assert!(value["variables"][0].get("class").is_none());
        assert_eq!(value["elements"][0]["category"], "package");
        assert_eq!(value["elements"][0]["description"], "Packages");
        assert_eq!(value["elements"][0]["items"][0]["type"], "scope");
        assert_eq!(value["elements"][0]["items"][0]["kind"], "package");
    }
}
