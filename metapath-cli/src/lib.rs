use std::io::Write;

use anyhow::Context;
use tracing::{info, warn};

pub mod args;
pub mod exit_codes;
pub mod report;
pub mod source;

use args::Cli;
use report::{Outcome, write_report};
use source::MetadataSource;

/// Fetch metadata from the source selected by `cli` and print the report to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<u8> {
    let source = cli
        .source()
        .context("failed to configure metadata source")?;
    run_with_source(source.as_ref(), cli, out)
}

pub fn run_with_source<W: Write>(
    source: &dyn MetadataSource,
    cli: &Cli,
    out: &mut W,
) -> anyhow::Result<u8> {
    info!(source = source.name(), key = %cli.key, "fetching instance metadata");
    let document = source
        .fetch()
        .with_context(|| format!("failed to fetch metadata from {}", source.name()))?;

    match write_report(out, &document, &cli.report_options())? {
        Outcome::Found => Ok(exit_codes::SUCCESS),
        Outcome::Absent(err) => {
            warn!(key = %cli.key, %err, "key did not resolve");
            if cli.strict {
                eprintln!("error: {err}");
                Ok(exit_codes::KEY_NOT_FOUND)
            } else {
                Ok(exit_codes::SUCCESS)
            }
        }
    }
}
