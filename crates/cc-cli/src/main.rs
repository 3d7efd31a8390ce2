use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cc_cli::{Cli, replay};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let mut stdout = std::io::stdout().lock();
    match replay(&text) {
        Ok(output) => {
            stdout
                .write_all(output.as_bytes())
                .context("failed to write output")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(error = %err, "replay aborted");
            writeln!(stdout, "{}", err.offending_line()).context("failed to write output")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
