//! Lumière CLI binary.
//!
//! Generates editorial profiles and manages the record catalog:
//! - Build a record from a subject, optionally publishing it
//! - Draw a random persona
//! - List, inspect, publish, delete and import records

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, generate_record, handle_record_command, random_persona};

    // API keys may live in a local .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    lumiere::init_logging(cli.verbose, cli.log_format.into());

    let config = cli.load_config()?;

    match cli.command {
        Commands::Generate {
            name,
            niche,
            details,
            publish,
        } => {
            generate_record(&config, name, niche, details, publish).await?;
        }

        Commands::Persona => {
            random_persona(&config).await?;
        }

        Commands::Records(command) => {
            handle_record_command(&config, command).await?;
        }
    }

    Ok(())
}
