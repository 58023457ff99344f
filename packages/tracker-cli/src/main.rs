use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracker::CatalogStore;

mod cli;
mod cmd;
mod context;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // .env is optional; environment variables win.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let store = CatalogStore::new(&cli.catalog);

    match cli.command {
        Command::Search { url } => cmd::search::run(&store, &url).await,
        Command::Refresh => cmd::refresh::run(&store).await,
        Command::List => cmd::list::run(&store),
        Command::Schedule { every, yes } => cmd::schedule::schedule(&store, every, yes),
        Command::Unschedule { yes } => cmd::schedule::unschedule(yes),
    }
}
