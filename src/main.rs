//! msgboard server entry point

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use msgboard::{db, http, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "msgboard", version, about = "HTTP message board backend")]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1:5555")]
    bind: SocketAddr,

    /// Postgres connection string (falls back to DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.debug)
        .compact()
        .init();

    let database_url = match cli.database_url {
        Some(url) => url,
        None => std::env::var("DATABASE_URL")
            .context("provide --database-url or set DATABASE_URL")?,
    };

    let pool = db::create_pool(&database_url)
        .await
        .context("failed to connect to database")?;

    db::migrations::run(&pool)
        .await
        .context("schema bootstrap failed")?;

    let config = ServerConfig {
        bind_addr: cli.bind,
    };
    http::run_server(pool, config)
        .await
        .context("server error")?;

    Ok(())
}
