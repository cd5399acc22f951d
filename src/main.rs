//! krusty CLI — production tracking for the cookie factory.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "krusty",
    version,
    about = "Production tracking for the cookie factory — warehouse ledger, recipes, pallets"
)]
struct Cli {
    /// Database file (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, default_value = "krusty.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: krusty::cli::Commands,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = krusty::cli::dispatch(cli.db, &cli.config, cli.command) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
