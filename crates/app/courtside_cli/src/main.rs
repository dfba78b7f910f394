// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands, ListCommand};
use courtside_api_client::{CourtsideClient, FileTokenStorage, SessionState};
use url::Url;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    if let Commands::Version = args.command {
        println!("courtside {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let client = connect(&args)?;
    let manager = client.manager();

    match &args.command {
        Commands::Login { username, password } => {
            let user = manager.login(username, password).await?;
            let role = if user.is_club_account {
                " (club account)"
            } else {
                ""
            };
            println!("Signed in as {}{role}", user.username);
        }
        Commands::Logout => {
            manager.logout().await?;
            println!("Signed out");
        }
        Commands::Status => status(&client).await?,
        Commands::Whoami => {
            let me = client.me().await?;
            manager.record_activity().await?;
            println!("{} <{}>", me.username, me.email);
            if let Some(name) = me.full_name {
                println!("name: {name}");
            }
            println!("club account: {}", me.is_club_account);
        }
        Commands::Staff {
            command: ListCommand::List,
        } => {
            let staff = client.list_staff().await?;
            manager.record_activity().await?;
            for member in staff {
                println!("{}\t{}\t{}", member.id, member.role, member.name);
            }
        }
        Commands::Inventory {
            command: ListCommand::List,
        } => {
            let items = client.list_inventory().await?;
            manager.record_activity().await?;
            for item in items {
                println!(
                    "{}\t{}\t{}\t{}",
                    item.id, item.category, item.quantity, item.name
                );
            }
        }
        Commands::Version => {}
    }

    Ok(())
}

fn connect(args: &Cli) -> Result<CourtsideClient> {
    let path = match &args.session_file {
        Some(path) => path.clone(),
        None => FileTokenStorage::default_path()
            .ok_or_else(|| Error::Custom("no data directory; pass --session-file".into()))?,
    };
    log::debug!("session file: {}", path.display());
    let storage = Arc::new(FileTokenStorage::new(path));
    Ok(CourtsideClient::connect(Url::parse(&args.server)?, storage)?)
}

/// Local view of the session. Never refreshes and never touches the network.
async fn status(client: &CourtsideClient) -> Result<()> {
    let manager = client.manager();
    let state = manager.state().await?;
    let Some(bundle) = manager.bundle().await? else {
        println!("Not signed in");
        return Ok(());
    };

    let label = match state {
        SessionState::NoSession => "not signed in",
        SessionState::ActiveAccess => "active",
        SessionState::AccessExpiredRefreshValid => {
            "access token expired, will refresh on next request"
        }
        SessionState::RefreshExpired => "session expired, sign in again",
    };
    println!("status: {label}");
    println!("access token expires: {}", bundle.expires_at.to_rfc3339());
    println!("session expires: {}", bundle.refresh_expires_at.to_rfc3339());
    if let Some(at) = manager.last_activity().await? {
        println!("last activity: {}", at.to_rfc3339());
    }
    if manager.is_user_inactive().await? {
        println!("inactive for more than 10 minutes");
    }
    Ok(())
}
