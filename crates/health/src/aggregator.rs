//! Health Aggregator Implementation

use reason::{Formatter, Reason};
use serde::{Serialize, Serializer};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use crate::config::HealthConfig;
use crate::response::{Response, STATUS_FAILING, STATUS_OK};

/// Separator joining key parts into one composite key.
///
/// Keys compare as whole joined strings, so parts containing the separator
/// collide with split parts: `["a@b"]` and `["a", "b"]` are the same key.
pub const KEY_SEPARATOR: &str = "@";

/// Failures stored under one composite key, in alert order
#[derive(Debug)]
struct Entry {
    key: String,
    reasons: Vec<Arc<Reason>>,
}

/// Keyed failure store shared by reporters and the health endpoint.
///
/// Alerts accumulate under their key until the key is resolved. The status
/// is derived from store emptiness on every read and no operation fails.
#[derive(Debug)]
pub struct Health {
    /// Formatter for the error list
    formatter: Formatter,
    /// Entries in key insertion order
    entries: RwLock<Vec<Entry>>,
}

impl Health {
    /// Create an empty aggregator with the default delimiter
    pub fn new() -> Self {
        Self::with_config(HealthConfig::default())
    }

    /// Create an empty aggregator
    pub fn with_config(config: HealthConfig) -> Self {
        info!("Creating health aggregator with config: {:?}", config);
        Self {
            formatter: Formatter::new(config.delimiter),
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Record a failure under the key built from `parts`.
    ///
    /// A missing cause (`None`) is still a failure, with an empty message.
    /// Alerting an existing key appends to it and keeps its position.
    pub fn alert<I, S>(&self, reason: impl Into<Reason>, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = composite_key(parts);
        let reason = Arc::new(reason.into());
        let mut entries = self.write();

        match entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => {
                entry.reasons.push(reason);
                debug!("Alert appended: {} (count: {})", key, entry.reasons.len());
            }
            None => {
                debug!("Alert raised: {}", key);
                entries.push(Entry {
                    key,
                    reasons: vec![reason],
                });
            }
        }
    }

    /// Clear every failure under the key built from `parts`
    pub fn resolve<I, S>(&self, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = composite_key(parts);
        let mut entries = self.write();

        if let Some(index) = entries.iter().position(|entry| entry.key == key) {
            let entry = entries.remove(index);
            debug!("Alert resolved: {} ({} cleared)", key, entry.reasons.len());
        }
    }

    /// 0 while nothing is stored, 1 otherwise
    pub fn status(&self) -> u8 {
        if self.read().is_empty() {
            STATUS_OK
        } else {
            STATUS_FAILING
        }
    }

    pub fn has_errors(&self) -> bool {
        self.status() != STATUS_OK
    }

    /// Every stored failure, formatted, in key insertion then alert order
    pub fn errors(&self) -> Vec<String> {
        let entries = self.read();
        self.format_all(&entries)
    }

    /// Status and formatted errors from a single snapshot
    pub fn response(&self) -> Response {
        let entries = self.read();
        Response::from_errors(self.format_all(&entries))
    }

    /// Status and the stored reasons themselves, unformatted.
    ///
    /// The snapshot shares the stored reasons, so taking it costs one
    /// reference count per failure and the store is never touched.
    pub fn expanded_response(&self) -> Response<Arc<Reason>> {
        let entries = self.read();
        let reasons = entries
            .iter()
            .flat_map(|entry| entry.reasons.iter().cloned())
            .collect();
        Response::from_errors(reasons)
    }

    /// Composite keys currently alerted, in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.read().iter().map(|entry| entry.key.clone()).collect()
    }

    /// Number of stored failures across all keys
    pub fn len(&self) -> usize {
        self.read().iter().map(|entry| entry.reasons.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Hierarchy delimiter used for the error list
    pub fn delimiter(&self) -> &str {
        self.formatter.delimiter()
    }

    fn format_all(&self, entries: &[Entry]) -> Vec<String> {
        entries
            .iter()
            .flat_map(|entry| entry.reasons.iter())
            .map(|reason| self.formatter.format(reason))
            .collect()
    }

    // Poisoned locks are recovered; no caller ever sees a lock error.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Health {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.response().serialize(serializer)
    }
}

fn composite_key<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .map(|part| part.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}
