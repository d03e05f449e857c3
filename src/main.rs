use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod model;
mod process;
mod store;
mod version;

fn main() -> Result<()> {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Usage errors share exit status 1 with every other failure.
            let _ = e.print();
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if cli.verbose {
                "pkg_publish=debug"
            } else {
                "pkg_publish=info"
            })
        }))
        .init();

    let root = std::env::current_dir().context("failed to determine working directory")?;

    if cli.init {
        cli::init::run(&root)
    } else if cli.clean {
        cli::clean::run(&root)
    } else {
        cli::publish::run(&root, &cli)
    }
}
