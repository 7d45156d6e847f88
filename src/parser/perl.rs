//! Perl outline extractor — flat line scanner.
//!
//! Recognizes subroutine declarations and definitions plus simple
//! `package Name;` statements, skipping POD blocks entirely. Subroutine
//! bodies are never parsed.

use crate::model::*;
use regex::Regex;
use std::convert::Infallible;
use std::sync::LazyLock;
use tracing::{debug, trace};

pub const PACKAGE: &str = PACKAGE_SCOPE;
pub const SUB_DECLARATION: &str = "subdec";
pub const SUBROUTINE: &str = "subroutine";

// -- Regex patterns -----------------------------------------------------------

/// POD command paragraph: `=head1`, `=pod`, `=item`, ...
static RE_POD_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^=[[:alpha:]]").unwrap());

static RE_POD_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^=cut").unwrap());

static RE_SUB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^sub\s").unwrap());

/// Only the bare `package Name;` statement; versions and block forms fail.
static RE_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^package\s+([^\s;]+)\s*;$").unwrap());

// -- Public API ---------------------------------------------------------------

/// Build the outline of a Perl buffer from its lines.
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

/// Like [`generate_tags`], but over a fallible line source. The first line
/// error is returned as-is.
pub fn try_generate_tags<I, S, E>(lines: I) -> Result<DocStruct, E>
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<str>,
{
    let mut tags = DocStruct::new();
    tags.set_element_description(PACKAGE, "Packages");
    tags.set_element_priority(PACKAGE, 3);
    tags.set_element_description(SUB_DECLARATION, "Subroutine Declarations");
    tags.set_element_priority(SUB_DECLARATION, 2);
    tags.set_element_description(SUBROUTINE, "Subroutines");
    tags.set_element_priority(SUBROUTINE, 1);

    let mut in_pod = false;
    for (lnum, line) in lines.into_iter().enumerate() {
        let line = line?;
        let line = line.as_ref();

        // POD command lines are skipped themselves
        if line.starts_with('=') && line.chars().count() > 1 {
            if RE_POD_END.is_match(line) {
                in_pod = false;
            } else if RE_POD_START.is_match(line) {
                in_pod = true;
            }
            continue;
        }
        if in_pod {
            continue;
        }

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if RE_SUB.is_match(line) {
            match extract_subroutine(line) {
                Some(Sub::Declaration(name)) => {
                    tags.add_element(SUB_DECLARATION, Function::new(name, lnum));
                }
                Some(Sub::Definition(name)) => {
                    tags.add_element(SUBROUTINE, Function::new(name, lnum));
                }
                None => trace!(line = lnum, text = line, "not a named subroutine"),
            }
        } else if let Some(caps) = RE_PACKAGE.captures(line) {
            tags.add_element(PACKAGE, Scope::package(&caps[1], lnum));
        }
    }

    if in_pod {
        trace!("buffer ended inside a POD block");
    }
    debug!(
        groups = tags.elements().len(),
        "perl outline extracted"
    );
    Ok(tags)
}

// -- Subroutine parsing -------------------------------------------------------

/// Classification of a `sub` line.
#[derive(Debug, PartialEq, Eq)]
pub enum Sub {
    /// Forward declaration without a body: `sub foo;`
    Declaration(String),
    /// Body follows on this or a later line: `sub foo {`
    Definition(String),
}

/// Classify a trimmed line starting with `sub` followed by whitespace.
///
/// Declarations come in four shapes, all ending in `;`:
/// `sub foo;`, `sub foo :attr;`, `sub foo (proto);`, `sub foo (proto) :attr;`.
/// Anything with a `{`, or that runs off the end of the line, is a
/// definition. A prototype or attribute on a definition line
/// (`sub foo($) {`), anonymous subs and junk in name position yield `None`.
pub fn extract_subroutine(line: &str) -> Option<Sub> {
    let rest = line.get(3..)?.trim();
    let is_decl_line = line.ends_with(';');

    let mut name = String::new();
    let mut name_done = false;
    let mut chars = rest.chars().peekable();

    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        match c {
            c if c.is_alphanumeric() || c == '_' => {
                if name_done {
                    // `sub foo bar`
                    return None;
                }
                name.push(c);
            }
            ':' if !name_done && !name.is_empty() && next == Some(':') => {
                // Package-qualified name
                chars.next();
                name.push_str("::");
            }
            ';' | ':' | '(' if is_decl_line => {
                return named(name, Sub::Declaration);
            }
            '{' => return named(name, Sub::Definition),
            c if c.is_whitespace() => name_done = true,
            _ => return None,
        }
    }

    // Opening brace is on a later line
    named(name, Sub::Definition)
}

fn named(name: String, kind: fn(String) -> Sub) -> Option<Sub> {
    if name.is_empty() || name.ends_with(':') {
        None
    } else {
        Some(kind(name))
    }
}
