//! In-memory settings store

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;

use super::{HostError, SaveBatch, SettingsStore};
use crate::domain::{SettingKey, SettingValue};

/// Settings held in process memory.
///
/// Used directly by tests and wrapped by [`FileSettingsStore`](super::FileSettingsStore).
pub struct MemorySettingsStore {
    values: Mutex<BTreeMap<SettingKey, SettingValue>>,
    staged: Mutex<BTreeMap<SettingKey, SettingValue>>,
    revision: watch::Sender<u64>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::with_values(std::iter::empty())
    }

    pub fn with_values(values: impl IntoIterator<Item = (SettingKey, SettingValue)>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            values: Mutex::new(values.into_iter().collect()),
            staged: Mutex::new(BTreeMap::new()),
            revision,
        }
    }

    /// Copy of every persisted value
    pub fn snapshot(&self) -> BTreeMap<SettingKey, SettingValue> {
        lock(&self.values).clone()
    }

    /// Values a save of `batch` writes: the staged values overlaid by `batch`
    pub(crate) fn changes(&self, batch: &SaveBatch) -> BTreeMap<SettingKey, SettingValue> {
        let mut changes = lock(&self.staged).clone();
        changes.extend(batch.iter().map(|(k, v)| (k.clone(), v.clone())));
        changes
    }

    /// Commit `batch` and the staged values, then notify subscribers
    pub(crate) fn commit(&self, batch: &SaveBatch) {
        let staged = std::mem::take(&mut *lock(&self.staged));
        {
            let mut values = lock(&self.values);
            values.extend(staged);
            values.extend(batch.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Take `values` as the whole persisted state after `written` went out,
    /// then notify subscribers.
    ///
    /// Staged values that were part of `written` are dropped; anything staged
    /// since stays staged.
    pub(crate) fn replace(
        &self,
        values: BTreeMap<SettingKey, SettingValue>,
        written: &BTreeMap<SettingKey, SettingValue>,
    ) {
        lock(&self.staged).retain(|k, v| written.get(k) != Some(v));
        *lock(&self.values) = values;
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Replace a value from outside any panel (another admin, a CLI)
    pub fn set_external(&self, key: impl Into<SettingKey>, value: impl Into<SettingValue>) {
        lock(&self.values).insert(key.into(), value.into());
        self.revision.send_modify(|rev| *rev += 1);
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &SettingKey) -> Result<Option<SettingValue>, HostError> {
        Ok(lock(&self.values).get(key).cloned())
    }

    async fn set_pending(&self, key: &SettingKey, value: SettingValue) -> Result<(), HostError> {
        lock(&self.staged).insert(key.clone(), value);
        Ok(())
    }

    async fn save(&self, batch: &SaveBatch) -> Result<(), HostError> {
        self.commit(batch);
        Ok(())
    }

    async fn load_by_prefix(
        &self,
        prefix: &str,
    ) -> Result<BTreeMap<SettingKey, SettingValue>, HostError> {
        Ok(lock(&self.values)
            .iter()
            .filter(|(k, _)| k.has_prefix(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
