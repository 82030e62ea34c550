//! Shared fakes for host services

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use smtp_panel::domain::{keys, SettingKey, SettingValue};
use smtp_panel::host::{
    HostError, MailEndpoint, MemorySettingsStore, SaveBatch, SendRequest, SendResponse,
    SettingsStore, StaticIdentity,
};
use smtp_panel::panel::{PanelOptions, PanelServices};

/// Memory store that counts saves and can be told to fail them
pub struct RecordingStore {
    pub inner: MemorySettingsStore,
    pub saves: AtomicUsize,
    pub fail_saves: AtomicBool,
}

impl RecordingStore {
    pub fn new(values: impl IntoIterator<Item = (SettingKey, SettingValue)>) -> Self {
        Self {
            inner: MemorySettingsStore::with_values(values),
            saves: AtomicUsize::new(0),
            fail_saves: AtomicBool::new(false),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_saves.store(failing, Ordering::SeqCst);
    }

    pub fn value(&self, key: &str) -> Option<SettingValue> {
        self.inner.snapshot().get(&SettingKey::new(key)).cloned()
    }
}

#[async_trait]
impl SettingsStore for RecordingStore {
    async fn get(&self, key: &SettingKey) -> Result<Option<SettingValue>, HostError> {
        self.inner.get(key).await
    }

    async fn set_pending(&self, key: &SettingKey, value: SettingValue) -> Result<(), HostError> {
        self.inner.set_pending(key, value).await
    }

    async fn save(&self, batch: &SaveBatch) -> Result<(), HostError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(HostError::Unavailable("settings service down".to_string()));
        }
        self.inner.save(batch).await
    }

    async fn load_by_prefix(
        &self,
        prefix: &str,
    ) -> Result<BTreeMap<SettingKey, SettingValue>, HostError> {
        self.inner.load_by_prefix(prefix).await
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.subscribe()
    }
}

/// Endpoint answering from a script and recording every request
#[derive(Default)]
pub struct ScriptedEndpoint {
    answers: Mutex<VecDeque<Result<SendResponse, HostError>>>,
    pub requests: Mutex<Vec<SendRequest>>,
}

impl ScriptedEndpoint {
    pub fn answering(answers: impl IntoIterator<Item = Result<SendResponse, HostError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl MailEndpoint for ScriptedEndpoint {
    async fn send(&self, request: &SendRequest) -> Result<SendResponse, HostError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SendResponse::sent()))
    }
}

/// Endpoint that never answers
pub struct SilentEndpoint;

#[async_trait]
impl MailEndpoint for SilentEndpoint {
    async fn send(&self, _request: &SendRequest) -> Result<SendResponse, HostError> {
        std::future::pending().await
    }
}

/// Persisted relay settings most tests start from
pub fn relay_settings() -> Vec<(SettingKey, SettingValue)> {
    vec![
        (SettingKey::new(keys::HOST), SettingValue::from("mail.example.com")),
        (SettingKey::new(keys::PORT), SettingValue::Integer(25)),
        (SettingKey::new(keys::USE_STARTTLS), SettingValue::Bool(true)),
    ]
}

/// Panel services on the current runtime
pub fn services(
    store: Arc<RecordingStore>,
    mail: Arc<dyn MailEndpoint>,
    email: Option<&str>,
) -> PanelServices {
    PanelServices {
        settings: store,
        mail,
        identity: Arc::new(StaticIdentity::new(email.map(str::to_string))),
        runtime: tokio::runtime::Handle::current(),
        options: PanelOptions::default(),
    }
}
