//! gentag — print the structural outline of Python and Perl source files.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `gentag -l python < file.py`
//! - **file mode**: `gentag -o outlines/ lib/ scripts/*.py`, or without `-o`
//!   to print every outline to stdout

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use gentag::Language;
use std::fs::{self, File};
use std::io::{self, BufReader, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gentag",
    about = "Print a structural outline (classes, functions, packages) of source files"
)]
struct Cli {
    /// Input files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Source language: python or perl. Required for stdin, otherwise
    /// overrides detection by file extension.
    #[arg(short = 'l', long)]
    lang: Option<String>,

    /// Output format: text (default), markdown, json
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Write one outline file per input into this directory instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// Log to stderr, `warn` and above unless RUST_LOG or `-v` say otherwise.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// stdin mode: stream stdin through the extractor named by `--lang`.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let lang: Language = cli
        .lang
        .as_deref()
        .context("--lang is required when reading from stdin")?
        .parse()?;

    let renderer = render::create_renderer(&cli.format)?;
    let doc = lang
        .read_tags(io::stdin().lock())
        .context("failed to read stdin")?;
    print!("{}", renderer.render(&doc)?);
    Ok(())
}

/// file mode: outline every input file, to stdout or into `--output`.
fn file_mode(cli: &Cli) -> Result<()> {
    let forced: Option<Language> = cli.lang.as_deref().map(str::parse).transpose()?;
    let renderer = render::create_renderer(&cli.format)?;
    let ext = renderer.file_extension();

    if let Some(dir) = cli.output.as_deref() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    let input_files = expand_globs(&cli.files)?;
    let with_headers = cli.output.is_none() && input_files.len() > 1;

    for (i, path) in input_files.iter().enumerate() {
        let doc = match outline_file(path, forced) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("skipping {}: {:#}", path.display(), e);
                continue;
            }
        };
        let rendered = renderer.render(&doc)?;

        match cli.output.as_deref() {
            Some(dir) => {
                let out_path = dir.join(format!("{}.{}", derive_output_name(path), ext));
                fs::write(&out_path, &rendered)
                    .with_context(|| format!("failed to write {}", out_path.display()))?;
                debug!(input = %path.display(), output = %out_path.display(), "outline written");
            }
            None if with_headers => {
                if i > 0 {
                    println!();
                }
                println!("==> {} <==", path.display());
                print!("{}", rendered);
            }
            None => print!("{}", rendered),
        }
    }

    Ok(())
}

fn outline_file(path: &Path, forced: Option<Language>) -> Result<gentag::DocStruct> {
    let lang = match forced {
        Some(lang) => lang,
        None => Language::from_path(path)?,
    };
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let doc = lang
        .read_tags(BufReader::new(file))
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(doc)
}

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for files whose extension
/// `Language::from_path` recognizes.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && Language::from_path(&p).is_ok() {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Output file name (without the renderer's extension) for a source path.
/// The source extension is kept so `Foo.pm` and `Foo.pl` do not collide:
/// "lib/Foo.pm" → "Foo.pm"
fn derive_output_name(source: &Path) -> String {
    source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "outline".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_keeps_source_extension() {
        assert_eq!(derive_output_name(Path::new("lib/Foo.pm")), "Foo.pm");
        assert_eq!(derive_output_name(Path::new("tool.py")), "tool.py");
    }

    #[test]
    fn directory_scan_follows_language_detection() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["a.py", "b.pyw", "c.pl", "d.pm", "e.t", "f.rb", "g.txt", "noext"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("sub.py")).unwrap();

        let found = expand_globs(&[dir.path().to_string_lossy().to_string()]).unwrap();
        let names: Vec<String> = found.iter().map(|p| derive_output_name(p)).collect();
        assert_eq!(names, vec!["a.py", "b.pyw", "c.pl", "d.pm", "e.t"]);
        assert!(found.iter().all(|p| Language::from_path(p).is_ok()));
    }

    #[test]
    fn output_name_fallback() {
        assert_eq!(derive_output_name(Path::new("/")), "outline");
    }
}
