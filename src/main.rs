use clap::Parser;

use sounds_console::cli::{self, Cli};
use sounds_console::{config, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = logging::init_logging(&config.logging, cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = cli::run(cli, config).await {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
