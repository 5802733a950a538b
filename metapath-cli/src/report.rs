use std::io::Write;

use anyhow::Context;
use serde_json::Value;

use metapath_core::{TraversalError, lookup_strict, render, render_compact};

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub key: String,
    pub compact: bool,
    pub key_only: bool,
}

/// What the lookup part of a report found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found,
    Absent(TraversalError),
}

/// Print the whole document, then the value at `options.key`.
///
/// An unresolved key prints `null`; the caller decides whether that is an error.
pub fn write_report<W: Write>(
    out: &mut W,
    document: &Value,
    options: &ReportOptions,
) -> anyhow::Result<Outcome> {
    let to_text = if options.compact { render_compact } else { render };

    if !options.key_only {
        writeln!(out, "All metadata:")?;
        writeln!(out, "{}", to_text(Some(document))?)?;
        writeln!(out)?;
        writeln!(out, "Metadata for key '{}':", options.key)?;
    }

    let result = lookup_strict(document, &options.key);
    let rendered = to_text(result.as_ref().ok().copied())
        .with_context(|| format!("failed to render value for key '{}'", options.key))?;
    writeln!(out, "{}", rendered)?;
    out.flush()?;

    Ok(match result {
        Ok(_) => Outcome::Found,
        Err(err) => Outcome::Absent(err),
    })
}
