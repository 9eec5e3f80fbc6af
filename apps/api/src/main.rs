mod config;
mod errors;
mod jobs;
mod matching;
mod models;
mod persist;
mod profile;
mod repository;
mod routes;
mod state;

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::fixtures::FixtureJobSource;
use crate::jobs::source::{HttpJobSource, JobSource};
use crate::matching::clock::SystemClock;
use crate::models::profile::{ApplicationRecord, Resume};
use crate::persist::debounce::{spawn_writer, DEBOUNCE_WINDOW};
use crate::persist::{
    load_or_default, FileKvStore, KvStore, KEY_APPLICATIONS, KEY_BOOKMARKS, KEY_KEYWORDS,
    KEY_NOTES, KEY_RESUMES, KEY_THEME,
};
use crate::profile::applications::ApplicationStore;
use crate::profile::preferences::Preferences;
use crate::repository::JobRepository;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.rust_log.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobHunter API v{}", env!("CARGO_PKG_VERSION"));

    // Open the key-value store and rehydrate persisted user state.
    // Missing or malformed blobs fall back to defaults without failing startup.
    let store: Arc<dyn KvStore> = Arc::new(FileKvStore::open(&config.data_dir)?);
    let keywords: Vec<String> = load_or_default(store.as_ref(), KEY_KEYWORDS);
    let bookmarks: Vec<u64> = load_or_default(store.as_ref(), KEY_BOOKMARKS);
    let notes: BTreeMap<u64, String> = load_or_default(store.as_ref(), KEY_NOTES);
    let dark_mode: bool = load_or_default(store.as_ref(), KEY_THEME);
    let applications: Vec<ApplicationRecord> = load_or_default(store.as_ref(), KEY_APPLICATIONS);
    let resumes: Vec<Resume> = load_or_default(store.as_ref(), KEY_RESUMES);
    info!(
        "Hydrated state: {} keywords, {} bookmarks, {} notes, {} applications, {} resumes",
        keywords.len(),
        bookmarks.len(),
        notes.len(),
        applications.len(),
        resumes.len()
    );

    // Debounced write-behind to the store
    let persist = spawn_writer(store, DEBOUNCE_WINDOW);

    let clock = Arc::new(SystemClock);

    // Listing source: external provider when a key is configured,
    // bundled fixtures otherwise.
    let source: Arc<dyn JobSource> = match &config.provider_api_key {
        Some(api_key) => {
            info!("Job source: provider at {}", config.provider_url);
            Arc::new(HttpJobSource::new(
                config.provider_url.clone(),
                api_key.clone(),
            ))
        }
        None => {
            warn!("JOB_API_KEY not set — serving bundled fixture listings");
            Arc::new(FixtureJobSource::new(clock.clone()))
        }
    };

    // Build app state
    let state = AppState {
        repo: Arc::new(RwLock::new(JobRepository::new(keywords, persist.clone()))),
        preferences: Arc::new(RwLock::new(Preferences::new(
            dark_mode,
            bookmarks,
            notes,
            persist.clone(),
        ))),
        applications: Arc::new(RwLock::new(ApplicationStore::new(
            applications,
            resumes,
            persist,
        ))),
        source,
        clock,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
