pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(about = "API-key authenticated to-do list server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    #[command(about = "Sync the schema and serve HTTP (default)")]
    Serve {
        #[arg(long, help = "Address to bind, overrides TODO_API_HOST")]
        host: Option<String>,
        #[arg(long, help = "Port to bind, overrides TODO_API_PORT")]
        port: Option<u16>,
    },

    #[command(about = "Create or update the users and todos tables, then exit")]
    Migrate,
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => commands::serve::handle(config, host, port).await,
        Commands::Migrate => commands::migrate::handle(config).await,
    }
}
