use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use metapath_cli::args::Cli;
use metapath_cli::exit_codes;

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the metadata
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match metapath_cli::run(&cli, &mut std::io::stdout().lock()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:#}");
            exit_codes::FETCH_ERROR
        }
    };
    ExitCode::from(code)
}
