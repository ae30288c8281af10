use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Simulated duration in seconds (overrides config)
    #[arg(long)]
    pub duration: Option<f32>,

    /// RNG seed (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,
}
