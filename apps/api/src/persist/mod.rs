//! Persistence adapter — a namespaced key-value store holding one JSON blob
//! per piece of mutable user state, plus startup hydration with defaults.
//!
//! The store is deliberately opaque to the rest of the service: callers see
//! `KvStore` and the debounced write handle, never the filesystem.

pub mod debounce;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::warn;

pub const KEY_KEYWORDS: &str = "job-hunter.keywords";
pub const KEY_BOOKMARKS: &str = "job-hunter.bookmarks";
pub const KEY_NOTES: &str = "job-hunter.notes";
pub const KEY_APPLICATIONS: &str = "job-hunter.applications";
pub const KEY_RESUMES: &str = "job-hunter.resumes";
pub const KEY_THEME: &str = "job-hunter.theme";

/// Opaque key-value store. Values are JSON blobs; keys are namespaced
/// strings. Implementations must be safe to call from the writer task.
pub trait KvStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn store(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: one `<key>.json` file per key under a data directory.
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileKvStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading stored key '{key}'")),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.path_for(key), value)
            .with_context(|| format!("writing stored key '{key}'"))
    }
}

/// Startup hydration: present and parseable → the stored value; absent or
/// malformed → the type's default, logged but never surfaced.
pub fn load_or_default<T>(store: &dyn KvStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("stored value under '{key}' is malformed, falling back to default: {e}");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            warn!("could not read '{key}', falling back to default: {e:#}");
            T::default()
        }
    }
}
