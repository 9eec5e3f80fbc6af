//! Debounced write-behind for the key-value store.
//!
//! Every mutation schedules the full current value of one key; the writer
//! task holds each key for a quiet window and flushes only the last value
//! seen. Keys debounce independently, so a burst on one key never delays or
//! reorders another key's final value. Store failures are logged here and
//! never reach the caller.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::KvStore;

/// Quiet window before a scheduled value is written out.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Cheap cloneable handle used by the stores to schedule writes.
#[derive(Clone)]
pub struct PersistHandle {
    tx: mpsc::UnboundedSender<(String, String)>,
}

impl PersistHandle {
    /// Serializes `value` and schedules it under `key`. Serialization
    /// failures and a stopped writer are logged, never propagated — a
    /// persistence problem must not break a mutation that already happened.
    pub fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                if self.tx.send((key.to_string(), json)).is_err() {
                    debug!("persistence writer stopped; dropping write for '{key}'");
                }
            }
            Err(e) => warn!("could not serialize state for '{key}': {e}"),
        }
    }

    /// Handle wired to a bare channel, for store tests that want to observe
    /// (or ignore) scheduled writes without a running writer task.
    #[cfg(test)]
    pub fn test_pair() -> (Self, mpsc::UnboundedReceiver<(String, String)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

/// Spawns the writer task and returns the handle the stores write through.
pub fn spawn_writer(store: Arc<dyn KvStore>, window: Duration) -> PersistHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run_writer(store, window, rx));
    PersistHandle { tx }
}

async fn run_writer(
    store: Arc<dyn KvStore>,
    window: Duration,
    mut rx: mpsc::UnboundedReceiver<(String, String)>,
) {
    // key → (latest value, due time). Re-inserting pushes the due time out,
    // which is what coalesces a burst into one write of the final value.
    let mut pending: HashMap<String, (String, Instant)> = HashMap::new();

    loop {
        let next_due = pending.values().map(|(_, due)| *due).min();

        tokio::select! {
            msg = rx.recv() => match msg {
                Some((key, value)) => {
                    pending.insert(key, (value, Instant::now() + window));
                }
                None => break,
            },
            _ = sleep_until_opt(next_due) => {
                flush_due(store.as_ref(), &mut pending, Instant::now());
            }
        }
    }

    // Senders are gone (shutdown); write out whatever is still pending.
    for (key, (value, _)) in pending.drain() {
        write_one(store.as_ref(), &key, &value);
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn flush_due(store: &dyn KvStore, pending: &mut HashMap<String, (String, Instant)>, now: Instant) {
    let due: Vec<String> = pending
        .iter()
        .filter(|(_, (_, deadline))| *deadline <= now)
        .map(|(key, _)| key.clone())
        .collect();
    for key in due {
        if let Some((value, _)) = pending.remove(&key) {
            write_one(store, &key, &value);
        }
    }
}

fn write_one(store: &dyn KvStore, key: &str, value: &str) {
    if let Err(e) = store.store(key, value) {
        warn!("persisting '{key}' failed: {e:#}");
    } else {
        debug!("persisted '{key}' ({} bytes)", value.len());
    }
}
