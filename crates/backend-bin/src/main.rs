//! Payments gateway server binary.

use anyhow::Context;
use clap::{Parser, Subcommand};
use payments_backend_lib::{
    auth::hash_password,
    config::Settings,
    router,
    store::{FlatFileStore, Store, UserRecord},
    AppState,
};
use payments_common::Role;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "payments-backend", about = "Secure payments gateway")]
struct Cli {
    /// Path to a TOML config file; defaults to the standard search order
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Upsert the demo staff accounts and exit
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    let store = FlatFileStore::new(&settings.data_dir).context("opening data directory")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(store, settings).await,
        Command::Seed => seed(store, &settings).await,
    }
}

async fn serve(store: FlatFileStore, settings: Settings) -> anyhow::Result<()> {
    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(store, settings)?);
    let app = router::create_router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Demo staff accounts for a fresh deployment. Upserts, so re-running is
/// harmless; passwords meet the strong registration policy.
async fn seed(store: FlatFileStore, settings: &Settings) -> anyhow::Result<()> {
    let users = [("employee1", "P@ssw0rd!123"), ("auditor", "P@ssw0rd!123")];

    for (username, password) in users {
        let hash = hash_password(password, &settings.hash_cost)?;
        let record = UserRecord::new(username.to_string(), hash, Role::Employee);
        store
            .upsert_user(&record)
            .await
            .map_err(|e| anyhow::anyhow!("seeding {username}: {e}"))?;
        tracing::info!(username, "seeded user");
    }
    println!(
        "Seeded users: {}",
        users.map(|(name, _)| name).join(", ")
    );
    Ok(())
}
