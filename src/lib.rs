//! gentag — fast, approximate source outlines without a parser.
//!
//! Each extractor makes one forward pass over a file's lines and returns a
//! [`DocStruct`]: classes with their methods and attributes, top-level
//! functions and variables, and language-specific element groups (Perl
//! packages and subroutines). Malformed input never fails extraction; it
//! simply yields fewer tags.
//!
//! ```
//! let doc = gentag::parser::python::generate_tags(["class Foo:", "    def bar(self):"]);
//! assert_eq!(doc.classes()[0].methods()[0].name, "bar");
//! ```

pub mod error;
pub mod model;
pub mod parser;

pub use error::{Error, Result};
pub use model::DocStruct;
pub use parser::Language;
