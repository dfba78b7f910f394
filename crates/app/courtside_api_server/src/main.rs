//! Courtside API server binary.
//!
//! Reads `JWT_SECRET` (or `AUTH_SECRET`) from the environment and refuses to
//! start without one.

use std::sync::Arc;

use clap::Parser;
use courtside_api::config::ApiConfig;
use courtside_core::db::Database;
use courtside_core::store::UserStore;
use tracing::{error, info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "courtside_api_server", about = "Courtside API server")]
struct Args {
    /// Port to listen on on 127.0.0.1. Overrides `BIND_ADDR`.
    #[arg(long)]
    port: Option<u16>,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/courtside"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Flag an existing user as the club account, then exit.
    #[arg(long, value_name = "USERNAME")]
    grant_club_account: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,courtside_api=debug,courtside_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "refusing to start");
            return Err(e.into());
        }
    };
    config.database_url = args.database_url;
    if let Some(port) = args.port {
        config.bind_addr = format!("127.0.0.1:{port}");
    }

    info!(?config, max_connections = args.max_connections, "starting courtside_api_server");

    let db = Database::connect(&config.database_url, args.max_connections).await?;

    info!("running database migrations");
    db.migrate().await?;

    if let Some(username) = args.grant_club_account {
        let store = db.store();
        let granted = match store.find_by_login(&username).await? {
            Some(record) => store.set_club_account(record.user.id, true).await?,
            None => false,
        };
        if granted {
            info!(%username, "club account granted");
        } else {
            warn!(%username, "no such user");
        }
        db.close().await;
        return Ok(());
    }

    let state = courtside_api::AppState::new(Arc::new(db.store()), config.clone());
    let app = courtside_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("shutting down");
        })
        .await;

    db.close().await;
    result?;
    Ok(())
}
