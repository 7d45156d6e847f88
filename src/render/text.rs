//! Plain-text outline, one entry per line with one-based line numbers.

use crate::render::{group_title, Renderer};
use anyhow::Result;
use gentag::model::*;

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, doc: &DocStruct) -> Result<String> {
        let mut sections: Vec<String> = Vec::new();

        if !doc.variables().is_empty() {
            let mut out = String::from("Variables:\n");
            for var in doc.variables() {
                out.push_str(&entry(2, var.name(), var.line()));
            }
            sections.push(out);
        }

        if !doc.functions().is_empty() {
            let mut out = String::from("Functions:\n");
            for func in doc.functions() {
                out.push_str(&entry(2, &format!("{}()", func.name()), func.line()));
            }
            sections.push(out);
        }

        if !doc.classes().is_empty() {
            let mut out = String::from("Classes:\n");
            for class in doc.classes() {
                out.push_str(&entry(2, class.name(), class.line()));
                for var in class.variables() {
                    out.push_str(&entry(4, var.name(), var.line()));
                }
                for method in class.methods() {
                    out.push_str(&entry(4, &format!("{}()", method.name()), method.line()));
                }
            }
            sections.push(out);
        }

        for (key, group) in doc.elements_by_priority() {
            let mut out = format!("{}:\n", group_title(key, group));
            for item in &group.items {
                out.push_str(&entry(2, item.name(), item.line()));
            }
            sections.push(out);
        }

        Ok(sections.join("\n"))
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

fn entry(indent: usize, name: &str, line: usize) -> String {
    format!("{:indent$}{} [{}]\n", "", name, line + 1, indent = indent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sections_in_order() {
        let mut doc = DocStruct::new();
        doc.add_variable(Variable::new("x", 6));
        doc.add_function(Function::new("baz", 4));
        let mut class = Class::new("Foo", 0);
        class.add_variable(Variable::owned_by("attr", 1, "Foo"));
        class.add_method(Method::new("bar", 2, "Foo"));
        doc.add_class(class);

        let out = TextRenderer.render(&doc).unwrap();
        assert_eq!(
            out,
            "Variables:\n  x [7]\n\nFunctions:\n  baz() [5]\n\nClasses:\n  Foo [1]\n    attr [2]\n    bar() [3]\n"
        );
    }

    #[test]
    fn element_groups_use_description_and_priority() {
        let mut doc = DocStruct::new();
        doc.set_element_description("package", "Packages");
        doc.set_element_priority("package", 3);
        doc.add_element("package", Scope::package("Foo", 0));
        doc.add_element("subroutine", Function::new("run", 2));
        doc.set_element_priority("subroutine", 1);

        let out = TextRenderer.render(&doc).unwrap();
        assert_eq!(out, "subroutine:\n  run [3]\n\nPackages:\n  Foo [1]\n");
    }

    #[test]
    fn empty_outline_renders_nothing() {
        assert_eq!(TextRenderer.render(&DocStruct::new()).unwrap(), "");
    }
}
