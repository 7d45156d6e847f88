//! Parser module — dispatch by language.

pub mod perl;
pub mod python;

use crate::error::{Error, Result};
use crate::model::DocStruct;
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

/// Languages with an outline extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    Perl,
}

impl Language {
    /// Infer the language from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("py" | "pyw") => Ok(Language::Python),
            Some("pl" | "pm" | "t") => Ok(Language::Perl),
            _ => Err(Error::UnsupportedLanguage(path.display().to_string())),
        }
    }

    /// Run this language's extractor over already-decoded lines.
    pub fn generate_tags<I, S>(self, lines: I) -> DocStruct
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self {
            Language::Python => python::generate_tags(lines),
            Language::Perl => perl::generate_tags(lines),
        }
    }

    /// Run this language's extractor over a buffered reader, line by line.
    pub fn read_tags<R: BufRead>(self, reader: R) -> Result<DocStruct> {
        let doc = match self {
            Language::Python => python::try_generate_tags(reader.lines())?,
            Language::Perl => perl::try_generate_tags(reader.lines())?,
        };
        Ok(doc)
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "perl" | "pl" => Ok(Language::Perl),
            _ => Err(Error::UnsupportedLanguage(name.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Python => "python",
            Language::Perl => "perl",
        })
    }
}

/// Parse a source file's contents, choosing the extractor from its extension.
pub fn parse_file(path: &Path, content: &str) -> Result<DocStruct> {
    Ok(Language::from_path(path)?.generate_tags(content.lines()))
}
