//! Python outline extractor — line-by-line indentation scanner.
//!
//! No tokenizer and no AST: each line is walked character by character,
//! looking only for `class`, `def`, bare `=` and the string/comment markers
//! that make those inert. Nesting is tracked with an explicit stack of
//! `(name, indent)` scopes that is popped whenever a token appears at or left
//! of the innermost scope's indent.

use crate::model::*;
use std::convert::Infallible;
use tracing::{debug, trace};

// -- Public API ---------------------------------------------------------------

/// Build the outline of a Python buffer from its lines.
pub fn generate_tags<I, S>(lines: I) -> DocStruct
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match try_generate_tags(lines.into_iter().map(Ok::<S, Infallible>)) {
        Ok(doc) => doc,
        Err(never) => match never {},
    }
}

/// Like [`generate_tags`], but over a fallible line source such as
/// `BufRead::lines()`. The first line error is returned as-is.
pub fn try_generate_tags<I, S, E>(lines: I) -> Result<DocStruct, E>
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::default();
    for (lnum, line) in lines.into_iter().enumerate() {
        scanner.scan_line(lnum, line?.as_ref());
    }
    Ok(scanner.finish())
}

// -- Scanner state ------------------------------------------------------------

#[derive(Debug)]
struct OpenScope {
    name: String,
    indent: usize,
}

#[derive(Default)]
struct Scanner {
    tags: DocStruct,
    /// Open class scopes, outermost first. The top is the open class.
    scopes: Vec<OpenScope>,
    in_docstring: bool,
    in_function: bool,
    /// Tokens left of this column end the current function body
    fn_indent: usize,
}

impl Scanner {
    fn scan_line(&mut self, lnum: usize, line: &str) {
        let chars: Vec<char> = line.chars().collect();
        let indent = chars.iter().take_while(|c| c.is_whitespace()).count();

        let mut idx = 0;
        // Bracket depth and statement start are per physical line
        let mut depth = 0usize;
        let mut stmt_start = 0;
        let mut assigned = false;

        while idx < chars.len() {
            if self.in_docstring {
                match find_closing_triple(&chars, idx) {
                    Some(end) => {
                        self.in_docstring = false;
                        idx = end;
                        continue;
                    }
                    None => return,
                }
            }

            let ch = chars[idx];
            if ch.is_whitespace() {
                idx += 1;
                continue;
            }
            if ch == '#' {
                return;
            }

            self.close_scopes(indent);

            if is_triple_quote(&chars, idx) {
                self.in_docstring = true;
                idx += 3;
            } else if ch == '"' || ch == '\'' {
                idx = skip_string(&chars, idx);
            } else if keyword_at(&chars, idx, "class") {
                self.open_class(lnum, indent, &chars[idx + 5..]);
                return;
            } else if keyword_at(&chars, idx, "def") {
                self.define_function(lnum, indent, &chars[idx + 3..]);
                return;
            } else if ch == '=' {
                if chars.get(idx + 1) == Some(&'=') {
                    idx += 2;
                    continue;
                }
                if depth == 0 && !assigned && !self.in_function && !follows_operator(&chars, idx)
                {
                    assigned = true;
                    let lhs: String = chars[stmt_start..idx].iter().collect();
                    self.assign(lnum, &lhs);
                }
                idx += 1;
            } else {
                match ch {
                    '(' | '[' | '{' => depth += 1,
                    ')' | ']' | '}' => depth = depth.saturating_sub(1),
                    ';' if depth == 0 => {
                        stmt_start = idx + 1;
                        assigned = false;
                    }
                    _ => {}
                }
                idx += 1;
            }
        }
    }

    /// Dedent handling, run before every significant token.
    fn close_scopes(&mut self, indent: usize) {
        if self.in_function && indent < self.fn_indent {
            self.in_function = false;
        }

        let dedented = self
            .scopes
            .last()
            .is_some_and(|open| indent <= open.indent);
        if dedented {
            self.scopes.retain(|scope| scope.indent < indent);
        }
    }

    fn open_class(&mut self, lnum: usize, indent: usize, rest: &[char]) {
        let rest: String = rest.iter().collect();
        let name = rest
            .split(['(', ':'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        if self.scopes.is_empty() {
            self.tags.add_class(Class::new(name.clone(), lnum));
        } else {
            trace!(line = lnum, class = %name, "nested class tracked but not emitted");
        }
        self.scopes.push(OpenScope { name, indent });
    }

    fn define_function(&mut self, lnum: usize, indent: usize, rest: &[char]) {
        let rest: String = rest.iter().collect();
        let name = rest.split('(').next().unwrap_or_default().trim().to_string();

        self.in_function = true;
        self.fn_indent = indent + 1;

        let in_class = indent > 0 && self.scopes.last().is_some_and(|open| !open.name.is_empty());
        if !in_class {
            self.tags.add_function(Function::new(name, lnum));
            return;
        }

        match self.tags.last_class_mut() {
            Some(class) => {
                let owner = class.name.clone();
                class.add_method(Method::new(name, lnum, owner));
            }
            None => trace!(line = lnum, method = %name, "method without an enclosing class"),
        }
    }

    fn assign(&mut self, lnum: usize, lhs: &str) {
        // Drop an annotation: `x: int = 1`
        let name = lhs.split(':').next().unwrap_or_default().trim();
        if name.is_empty() {
            return;
        }

        if !self.scopes.is_empty() {
            if let Some(class) = self.tags.last_class_mut() {
                let owner = class.name.clone();
                class.add_variable(Variable::owned_by(name, lnum, owner));
                return;
            }
        }
        self.tags.add_variable(Variable::new(name, lnum));
    }

    fn finish(self) -> DocStruct {
        if self.in_docstring {
            trace!("buffer ended inside a triple-quoted string");
        }
        debug!(
            classes = self.tags.classes().len(),
            functions = self.tags.functions().len(),
            variables = self.tags.variables().len(),
            "python outline extracted"
        );
        self.tags
    }
}

// -- Character helpers --------------------------------------------------------

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_triple_quote(chars: &[char], idx: usize) -> bool {
    match chars.get(idx) {
        Some(&q) if q == '"' || q == '\'' => {
            chars.get(idx + 1) == Some(&q) && chars.get(idx + 2) == Some(&q)
        }
        _ => false,
    }
}

/// Position just past the next triple quote at or after `from`.
fn find_closing_triple(chars: &[char], from: usize) -> Option<usize> {
    let mut idx = from;
    while idx < chars.len() {
        if chars[idx] == '\\' {
            idx += 2;
            continue;
        }
        if is_triple_quote(chars, idx) {
            return Some(idx + 3);
        }
        idx += 1;
    }
    None
}

/// Skip a single-line string literal starting at `start`. Unterminated
/// strings run to the end of the line.
fn skip_string(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut idx = start + 1;
    while idx < chars.len() {
        match chars[idx] {
            '\\' => idx += 2,
            c if c == quote => return idx + 1,
            _ => idx += 1,
        }
    }
    chars.len()
}

/// `keyword` at `idx` as a whole word followed by whitespace.
fn keyword_at(chars: &[char], idx: usize, keyword: &str) -> bool {
    if idx > 0 && is_ident(chars[idx - 1]) {
        return false;
    }
    let mut end = idx;
    for k in keyword.chars() {
        if chars.get(end) != Some(&k) {
            return false;
        }
        end += 1;
    }
    chars.get(end).is_some_and(|c| c.is_whitespace())
}

/// Comparison and augmented-assignment operators ending in `=`.
fn follows_operator(chars: &[char], idx: usize) -> bool {
    idx > 0
        && matches!(
            chars[idx - 1],
            '!' | '<' | '>' | '=' | ':' | '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '@'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(input: &str) -> DocStruct {
        generate_tags(input.lines())
    }

    fn names<T: Tag>(items: &[T]) -> Vec<&str> {
        items.iter().map(|t| t.name()).collect()
    }

    #[test]
    fn method_belongs_to_class() {
        let doc = tags("class Foo:\n    def bar(self):\n        pass\n");
        assert_eq!(doc.classes().len(), 1);
        let class = &doc.classes()[0];
        assert_eq!(class.name(), "Foo");
        assert_eq!(class.line(), 0);
        assert_eq!(class.methods().len(), 1);
        assert_eq!(class.methods()[0].name, "bar");
        assert_eq!(class.methods()[0].class, "Foo");
        assert_eq!(class.methods()[0].line, 1);
        assert!(doc.functions().is_empty());
    }

    #[test]
    fn top_level_function() {
        let doc = tags("def baz():\n    return 1\n");
        assert_eq!(names(doc.functions()), vec!["baz"]);
        assert!(doc.classes().is_empty());
    }

    #[test]
    fn class_name_stops_at_bases() {
        let doc = tags("class Child(Base, metaclass=Meta):\n    pass\nclass Plain :\n    pass\n");
        assert_eq!(names(doc.classes()), vec!["Child", "Plain"]);
    }

    #[test]
    fn docstring_contents_are_inert() {
        let input = r#"x = """
class X:
def y():
"""
'''
class Z:
''' ; w = 2
"#;
        let doc = tags(input);
        assert!(doc.classes().is_empty());
        assert!(doc.functions().is_empty());
        assert_eq!(names(doc.variables()), vec!["x", "w"]);
    }

    #[test]
    fn single_line_docstring_resumes_scanning() {
        let input = "class A:\n    \"\"\"Doc.\"\"\"\n    def m(self): pass\n";
        let doc = tags(input);
        assert_eq!(names(doc.classes()[0].methods()), vec!["m"]);
    }

    #[test]
    fn dedent_closes_class() {
        let doc = tags("class A:\n    def m(self):\n        pass\nx = 1\n");
        assert_eq!(doc.variables().len(), 1);
        assert_eq!(doc.variables()[0].name, "x");
        assert_eq!(doc.variables()[0].class, None);
        assert!(doc.classes()[0].variables().is_empty());
    }

    #[test]
    fn class_attributes_and_function_locals() {
        let input = "\
class A:
    x = 1
    def a(self):
        y = 2
    z = 3
class B:
    def b(self):
        pass
top = 4
";
        let doc = tags(input);
        let a = &doc.classes()[0];
        assert_eq!(names(a.variables()), vec!["x", "z"]);
        assert_eq!(a.variables()[1].class.as_deref(), Some("A"));
        assert_eq!(names(a.methods()), vec!["a"]);
        assert_eq!(names(doc.classes()[1].methods()), vec!["b"]);
        assert_eq!(names(doc.variables()), vec!["top"]);
        assert_eq!(doc.variables()[0].line, 8);
    }

    #[test]
    fn nested_class_is_not_emitted() {
        let input = "\
class Outer:
    class Inner:
        def deep(self): pass
    def shallow(self): pass
def free(): pass
";
        let doc = tags(input);
        assert_eq!(names(doc.classes()), vec!["Outer"]);
        assert_eq!(names(doc.classes()[0].methods()), vec!["deep", "shallow"]);
        assert_eq!(names(doc.functions()), vec!["free"]);
    }

    #[test]
    fn comments_and_strings_hide_tokens() {
        let input = "# class Hidden:\nlabel = \"def nope(): a = b\" # c = d\nvalue = 'it''s'\n";
        let doc = tags(input);
        assert!(doc.classes().is_empty());
        assert!(doc.functions().is_empty());
        assert_eq!(names(doc.variables()), vec!["label", "value"]);
    }

    #[test]
    fn comparisons_are_not_assignments() {
        let input = "if a == b:\n    pass\nwhile c != d: pass\nn += 1\nok = e >= f\ncall(k=1)\n";
        let doc = tags(input);
        assert_eq!(names(doc.variables()), vec!["ok"]);
    }

    #[test]
    fn assignment_forms() {
        let input = "a = b = 1\nlimit: int = 10\nimport os; path = os.sep\n";
        let doc = tags(input);
        assert_eq!(names(doc.variables()), vec!["a", "limit", "path"]);
    }

    #[test]
    fn keywords_need_word_boundaries() {
        let input = "subclass = 1\nundef = 2\nclassify(x)\n";
        let doc = tags(input);
        assert!(doc.classes().is_empty());
        assert!(doc.functions().is_empty());
        assert_eq!(names(doc.variables()), vec!["subclass", "undef"]);
    }

    #[test]
    fn tabs_count_as_one_column() {
        let doc = tags("class T:\n\tdef m(self):\n\t\tpass\n");
        assert_eq!(names(doc.classes()[0].methods()), vec!["m"]);
    }

    #[test]
    fn malformed_input_never_panics() {
        let input = "class\ndef\nclass :\n    def (:\n=\n\"\"\"\n";
        let doc = tags(input);
        assert_eq!(doc.classes().len(), 1);
        assert_eq!(doc.classes()[0].name(), "");
    }

    #[test]
    fn unnamed_class_keeps_functions_top_level() {
        let doc = tags("class :\n    def f(x):\n        pass\n");
        assert_eq!(names(doc.classes()), vec![""]);
        assert!(doc.classes()[0].methods().is_empty());
        assert_eq!(names(doc.functions()), vec!["f"]);
    }

    #[test]
    fn extraction_is_repeatable() {
        let input = "class A:\n    v = 1\n    def m(self): pass\ndef f(): pass\n";
        assert_eq!(tags(input), tags(input));
    }

    #[test]
    fn line_errors_propagate() {
        use std::io;
        let lines = vec![
            Ok("class A:".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8")),
            Ok("def f(): pass".to_string()),
        ];
        let err = try_generate_tags(lines).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
