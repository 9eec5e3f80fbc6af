use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::jobs::source::JobSource;
use crate::matching::clock::Clock;
use crate::profile::applications::ApplicationStore;
use crate::profile::preferences::Preferences;
use crate::repository::JobRepository;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything here is constructed once in `main` and passed
/// down explicitly — no ambient lookup, so tests build isolated instances.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<RwLock<JobRepository>>,
    pub preferences: Arc<RwLock<Preferences>>,
    pub applications: Arc<RwLock<ApplicationStore>>,
    /// Pluggable listing source: HTTP provider when an API key is
    /// configured, bundled fixtures otherwise.
    pub source: Arc<dyn JobSource>,
    /// Injectable "now" for urgency windows and application timestamps.
    pub clock: Arc<dyn Clock>,
    pub config: Config,
}
