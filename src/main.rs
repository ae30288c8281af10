// Entry point: parses the CLI and runs the headless scene driver.
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pluvial::app;
use pluvial::cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    app::run(args)
}
