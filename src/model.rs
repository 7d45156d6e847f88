//! Outline model shared by every extractor — format-agnostic.
//!
//! A [`DocStruct`] is built by exactly one extraction pass and handed back to
//! the caller as a finished value. Line numbers are zero-based indices into
//! the line sequence the extractor consumed.

use indexmap::IndexMap;
use serde::Serialize;

/// Category used for package scopes.
pub const PACKAGE_SCOPE: &str = "package";

/// A named, line-numbered source entity.
pub trait Tag {
    fn name(&self) -> &str;
    fn line(&self) -> usize;
}

/// Top-level (module scope) function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub line: usize,
}

/// Function declared inside a class body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub line: usize,
    /// Name of the owning class (not a reference to it)
    pub class: String,
}

/// Assignment target, either module scope or owned by a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// Top-level class with its members in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Class {
    pub name: String,
    pub line: usize,
    methods: Vec<Method>,
    variables: Vec<Variable>,
}

/// Named nesting level such as a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub name: String,
    pub line: usize,
    /// e.g. "package"
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Function {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

impl Method {
    pub fn new(name: impl Into<String>, line: usize, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line,
            class: class.into(),
        }
    }
}

impl Variable {
    /// Module-scope variable.
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            class: None,
        }
    }

    /// Class attribute.
    pub fn owned_by(name: impl Into<String>, line: usize, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line,
            class: Some(class.into()),
        }
    }
}

impl Class {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            methods: Vec::new(),
            variables: Vec::new(),
        }
    }

    pub fn add_method(&mut self, method: Method) {
        self.methods.push(method);
    }

    pub fn add_variable(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }
}

impl Scope {
    pub fn new(
        name: impl Into<String>,
        line: usize,
        kind: impl Into<String>,
        parent: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            line,
            kind: kind.into(),
            parent,
        }
    }

    /// A scope of kind [`PACKAGE_SCOPE`].
    pub fn package(name: impl Into<String>, line: usize) -> Self {
        Self::new(name, line, PACKAGE_SCOPE, None)
    }

    pub fn is_package(&self) -> bool {
        self.kind == PACKAGE_SCOPE
    }
}

macro_rules! impl_tag {
    ($($ty:ty),*) => {
        $(impl Tag for $ty {
            fn name(&self) -> &str {
                &self.name
            }

            fn line(&self) -> usize {
                self.line
            }
        })*
    };
}

impl_tag!(Function, Method, Variable, Class, Scope);

/// Any tag stored in an element category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Class(Class),
    Function(Function),
    Method(Method),
    Variable(Variable),
    Scope(Scope),
}

impl Tag for Element {
    fn name(&self) -> &str {
        match self {
            Element::Class(t) => t.name(),
            Element::Function(t) => t.name(),
            Element::Method(t) => t.name(),
            Element::Variable(t) => t.name(),
            Element::Scope(t) => t.name(),
        }
    }

    fn line(&self) -> usize {
        match self {
            Element::Class(t) => t.line(),
            Element::Function(t) => t.line(),
            Element::Method(t) => t.line(),
            Element::Variable(t) => t.line(),
            Element::Scope(t) => t.line(),
        }
    }
}

impl From<Function> for Element {
    fn from(f: Function) -> Self {
        Element::Function(f)
    }
}

impl From<Scope> for Element {
    fn from(s: Scope) -> Self {
        Element::Scope(s)
    }
}

impl From<Class> for Element {
    fn from(c: Class) -> Self {
        Element::Class(c)
    }
}

impl From<Method> for Element {
    fn from(m: Method) -> Self {
        Element::Method(m)
    }
}

impl From<Variable> for Element {
    fn from(v: Variable) -> Self {
        Element::Variable(v)
    }
}

/// Items of one element category plus its display metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementGroup {
    pub description: String,
    /// Lower sorts first; carried as data only
    pub priority: i32,
    pub items: Vec<Element>,
}

/// Complete outline of a single source buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocStruct {
    classes: Vec<Class>,
    functions: Vec<Function>,
    variables: Vec<Variable>,
    elements: IndexMap<String, ElementGroup>,
}

impl DocStruct {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: Class) {
        self.classes.push(class);
    }

    pub fn add_function(&mut self, function: Function) {
        self.functions.push(function);
    }

    pub fn add_variable(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    /// Append `tag` to `category`, creating the category on first use.
    pub fn add_element(&mut self, category: &str, tag: impl Into<Element>) {
        self.group_mut(category).items.push(tag.into());
    }

    pub fn set_element_description(&mut self, category: &str, description: impl Into<String>) {
        self.group_mut(category).description = description.into();
    }

    pub fn set_element_priority(&mut self, category: &str, priority: i32) {
        self.group_mut(category).priority = priority;
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Populated categories in the order they were first touched.
    pub fn elements(&self) -> Vec<(&str, &[Element])> {
        self.element_groups()
            .map(|(key, group)| (key, group.items.as_slice()))
            .collect()
    }

    /// Populated categories with their metadata, in first-touch order.
    pub fn element_groups(&self) -> impl Iterator<Item = (&str, &ElementGroup)> {
        self.elements
            .iter()
            .filter(|(_, group)| !group.items.is_empty())
            .map(|(key, group)| (key.as_str(), group))
    }

    /// Populated categories sorted by ascending priority. Ties keep
    /// first-touch order.
    pub fn elements_by_priority(&self) -> Vec<(&str, &ElementGroup)> {
        let mut groups: Vec<_> = self.element_groups().collect();
        groups.sort_by_key(|(_, group)| group.priority);
        groups
    }

    /// Metadata and items for one category, populated or not.
    pub fn element_group(&self, category: &str) -> Option<&ElementGroup> {
        self.elements.get(category)
    }

    pub fn last_class(&self) -> Option<&Class> {
        self.classes.last()
    }

    pub fn last_class_mut(&mut self) -> Option<&mut Class> {
        self.classes.last_mut()
    }

    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.functions.is_empty()
            && self.variables.is_empty()
            && self.element_groups().next().is_none()
    }

    fn group_mut(&mut self, category: &str) -> &mut ElementGroup {
        self.elements.entry(category.to_string()).or_default()
    }
}
