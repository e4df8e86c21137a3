//! Namika API Server
//!
//! Run with: cargo run --bin namika
//!
//! # Configuration
//!
//! Read from `--config`, or the first of `~/.config/namika/config.toml`,
//! `/etc/namika/config.toml` and `./config.toml`. Environment variables:
//! - `NAMIKA_DATA_DIR`: Where the session is stored
//! - `NAMIKA_API_HOST` / `NAMIKA_API_PORT`: Listen address (default: 127.0.0.1:8085)
//! - `NAMIKA_REGISTER_DELAY_MS`: Mock registration delay (default: 1000)
//! - `NAMIKA_LOG_LEVEL` / `NAMIKA_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Overrides the log filter entirely

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use namika::api::{serve, AppState};
use namika::config::Config;
use namika::logging::init_tracing;
use namika::session::{
    FileStore, KeyValueStore, Preferences, SessionError, SessionStore, USER_KEY,
};
use namika::store::StudyStore;

#[derive(Parser)]
#[command(name = "namika")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Namika research study marketplace API server")]
struct Args {
    /// Config file (default: search the usual locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging)?;

    tracing::info!("Starting Namika API server v{}", env!("CARGO_PKG_VERSION"));

    let session_dir = config.storage.session_dir();
    std::fs::create_dir_all(&session_dir)
        .with_context(|| format!("creating session directory {}", session_dir.display()))?;
    tracing::info!("Session directory: {:?}", session_dir);

    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(session_dir.clone()));

    let mut session = SessionStore::new(Arc::clone(&storage))
        .with_register_delay(config.session.register_delay());
    restore_session(&mut session, storage.as_ref())?;

    let studies = StudyStore::seeded();
    tracing::info!(
        studies = studies.studies().len(),
        applications = studies.applications().len(),
        "Study store seeded"
    );

    let state = AppState::new(
        studies,
        session,
        Preferences::new(storage),
        config.api.clone(),
    );

    serve(state, &config.api).await?;

    tracing::info!("Namika API server stopped");
    Ok(())
}

/// Pick up the stored user; an unreadable one is discarded
fn restore_session(session: &mut SessionStore, storage: &dyn KeyValueStore) -> anyhow::Result<()> {
    match session.restore() {
        Ok(Some(user)) => {
            tracing::info!(user_id = %user.id, user_type = %user.user_type(), "Restored session");
        }
        Ok(None) => tracing::info!("No stored session"),
        Err(SessionError::Corrupt { key, error }) => {
            tracing::warn!(%key, %error, "Discarding unreadable stored session");
            storage.remove(USER_KEY)?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
