mod app;
mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Load configuration
    let config = clipnotes_core::Config::load(cli.config)?;
    info!("Loaded configuration: {:?}", config);

    let mut app = app::App::new(config)?;
    match cli.command.unwrap_or(Command::Watch) {
        Command::Watch => {
            info!("Starting ClipNotes clipboard watcher");
            app.watch().await?;
        }
        command => {
            let stdout = std::io::stdout();
            app.run_command(command, &mut stdout.lock())?;
        }
    }

    Ok(())
}
