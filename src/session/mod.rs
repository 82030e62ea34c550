//! Edit sessions: pending edits for the fields bound on one panel
//!
//! An [`EditSession`] owns the pending-edit map of a panel. Controls read and
//! write it through [`FieldBinding`]s; the panel drives saves with
//! [`EditSession::begin_save`] / [`EditSession::finish_save`] so the network
//! call can run off the UI loop, or with [`EditSession::save`] when it can
//! simply await.
//!
//! Derived state is recomputed on every read:
//! - `is_modified`: some pending value differs from its persisted value
//! - `is_saving`: a batch has been handed out and not yet finished

mod binding;
mod error;

pub use binding::FieldBinding;
pub use error::SessionError;

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::domain::{FieldSpec, SettingKey, SettingValue};
use crate::host::{HostError, SaveBatch, SettingsStore};

/// Pending edits and save state of one panel instance
#[derive(Debug, Clone)]
pub struct EditSession {
    fields: Vec<FieldSpec>,
    persisted: BTreeMap<SettingKey, SettingValue>,
    pending: BTreeMap<SettingKey, SettingValue>,
    saving: bool,
    last_error: Option<SessionError>,
}

impl EditSession {
    /// Session over `fields` with nothing persisted yet
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            persisted: BTreeMap::new(),
            pending: BTreeMap::new(),
            saving: false,
            last_error: None,
        }
    }

    /// Session over `fields` seeded with the host's persisted values.
    ///
    /// Values for keys that are not bound are ignored.
    pub fn with_persisted(
        fields: Vec<FieldSpec>,
        values: impl IntoIterator<Item = (SettingKey, SettingValue)>,
    ) -> Self {
        let mut session = Self::new(fields);
        session.refresh(values);
        session
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, key: &SettingKey) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| &f.key == key)
    }

    /// Persisted value of a bound key; the kind's zero value when the host
    /// has none
    pub fn persisted_value(&self, key: &SettingKey) -> Option<SettingValue> {
        let field = self.field(key)?;
        Some(
            self.persisted
                .get(key)
                .cloned()
                .unwrap_or_else(|| field.kind.empty_value()),
        )
    }

    pub fn pending_value(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.pending.get(key)
    }

    /// Displayed value: the pending edit if present, else the persisted value
    pub fn value(&self, key: &SettingKey) -> Option<SettingValue> {
        match self.pending.get(key) {
            Some(v) => Some(v.clone()),
            None => self.persisted_value(key),
        }
    }

    /// Binding for the control showing `key`; `None` if the key is not bound
    pub fn binding(&mut self, key: &SettingKey) -> Option<FieldBinding<'_>> {
        let field = self.field(key)?.clone();
        Some(FieldBinding::new(self, field))
    }

    pub fn is_modified(&self) -> bool {
        self.pending
            .iter()
            .any(|(key, value)| self.persisted_value(key).as_ref() != Some(value))
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Save enabled: something to save and no save in flight
    pub fn can_save(&self) -> bool {
        self.is_modified() && !self.saving
    }

    /// Reset enabled: something to discard
    pub fn can_reset(&self) -> bool {
        self.is_modified()
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Discard every pending edit. No host call is made.
    pub fn reset(&mut self) {
        if !self.pending.is_empty() {
            debug!("Discarding {} pending edit(s)", self.pending.len());
        }
        self.pending.clear();
        self.last_error = None;
    }

    /// Start a save of all pending edits.
    ///
    /// Returns `Ok(None)` without touching any state when there is nothing to
    /// save or a save is already in flight. Pending values that do not fit
    /// their field are reported before the session enters the saving state.
    pub fn begin_save(&mut self) -> Result<Option<SaveBatch>, SessionError> {
        if self.saving || !self.is_modified() {
            return Ok(None);
        }

        let invalid = self.pending.iter().find_map(|(key, value)| {
            let field = self.field(key)?;
            field.validate(value).err().map(|message| SessionError::Invalid {
                key: key.clone(),
                message,
            })
        });
        if let Some(err) = invalid {
            self.last_error = Some(err.clone());
            return Err(err);
        }

        let batch: SaveBatch = self
            .pending
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        self.saving = true;
        self.last_error = None;
        info!("Saving {} setting(s)", batch.len());
        Ok(Some(batch))
    }

    /// Apply the host's answer to a batch handed out by `begin_save`.
    ///
    /// On success the batch becomes the persisted state and pending slots
    /// still holding the saved value are cleared; edits made while the save
    /// was in flight are kept. On failure every pending edit is kept and the
    /// error is returned and remembered for display.
    pub fn finish_save(
        &mut self,
        batch: &SaveBatch,
        result: Result<(), HostError>,
    ) -> Result<(), SessionError> {
        if !self.saving {
            debug!("Ignoring save completion with no save in flight");
            return Ok(());
        }
        self.saving = false;

        match result {
            Ok(()) => {
                for (key, value) in batch.iter() {
                    self.persisted.insert(key.clone(), value.clone());
                    if self.pending.get(key) == Some(value) {
                        self.pending.remove(key);
                    }
                }
                info!("Saved {} setting(s)", batch.len());
                Ok(())
            }
            Err(e) => {
                warn!("Saving settings failed: {}", e);
                let err = SessionError::Save(e);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Save all pending edits through `store` and wait for the answer.
    ///
    /// Returns `Ok(false)` when there was nothing to save.
    pub async fn save<S>(&mut self, store: &S) -> Result<bool, SessionError>
    where
        S: SettingsStore + ?Sized,
    {
        let Some(batch) = self.begin_save()? else {
            return Ok(false);
        };
        let result = store.save(&batch).await;
        self.finish_save(&batch, result)?;
        Ok(true)
    }

    /// Take persisted values observed on the host (initial load or a change
    /// made elsewhere). Pending edits are kept unless they now equal the
    /// persisted value.
    pub fn refresh(&mut self, values: impl IntoIterator<Item = (SettingKey, SettingValue)>) {
        for (key, value) in values {
            if self.field(&key).is_some() {
                self.persisted.insert(key, value);
            }
        }
        let persisted = &self.persisted;
        let fields = &self.fields;
        self.pending.retain(|key, value| {
            let current = persisted.get(key).cloned().or_else(|| {
                fields
                    .iter()
                    .find(|f| &f.key == key)
                    .map(|f| f.kind.empty_value())
            });
            current.as_ref() != Some(value)
        });
    }

    /// Record a pending edit. Only reachable through [`FieldBinding`].
    fn record(&mut self, key: &SettingKey, value: SettingValue) {
        if self.persisted_value(key).as_ref() == Some(&value) {
            self.pending.remove(key);
        } else {
            self.pending.insert(key.clone(), value);
        }
    }
}
