//! chatbridge command-line entry point
//!
//! Drives the conversion functions from files and prints JSON to stdout.

use chatbridge::{
    cli::{self, Cli, Command},
    config::Config,
    telemetry,
};
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Handle config subcommand before loading config (it generates one)
    if let Command::Config { output } = &cli.command {
        let template = cli::generate_config_template();
        match output {
            Some(path) => {
                std::fs::write(path, template)?;
                eprintln!("Configuration template written to {}", path);
            }
            None => print!("{}", template),
        }
        return Ok(());
    }

    let config = Config::load_or_default(&cli.config)?;

    telemetry::init(&config.observability.log_level);

    tracing::debug!(config_path = %cli.config, "Configuration loaded");

    let output = cli::execute(&cli.command, &config)?;
    println!("{}", output);

    Ok(())
}
