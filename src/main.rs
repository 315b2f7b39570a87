use clap::Parser;
use forge::cli::{Cli, Command};
use forge::commands;
use forge::config::Settings;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    match &cli.command {
        Command::Serve { .. } => {
            info!(
                "Starting Forge generation service on {}:{}",
                settings.server.host, settings.server.port
            );
            commands::serve(&settings).await?;
        }
        Command::Generate { input, output, count } => {
            let written = commands::generate_to_file(input, output, *count)?;
            println!("Success: Generated {} records to '{}'", written, output.display());
        }
        Command::Request { input, count, .. } => {
            let rendered = commands::request_remote(&settings, input, *count).await?;
            println!("{}", rendered);
        }
    }

    Ok(())
}
