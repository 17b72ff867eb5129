use clap::Parser;
use todo_api::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, TODO_API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = todo_api::config::config().clone();
    tracing::info!("Starting todo-api in {:?} mode", config.environment);

    if let Err(e) = todo_api::cli::run(cli, config).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
