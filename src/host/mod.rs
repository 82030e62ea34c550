//! Host collaborator interfaces
//!
//! The panel never reaches into ambient host state. Every service it needs is
//! one of the traits below, handed to it when it is constructed:
//! - [`SettingsStore`]: persisted settings, batch saves, change notifications
//! - [`IdentityService`]: the signed-in user's email (default test recipient)
//! - [`MailEndpoint`]: the `send-email` endpoint
//! - [`ExtensionRegistry`](crate::extension::ExtensionRegistry): panel slots
//!
//! The demo host used by the binary provides file-backed and in-memory
//! implementations of each.

mod error;
mod file;
mod identity;
mod memory;
mod wire;

pub use error::HostError;
pub use file::FileSettingsStore;
pub use identity::StaticIdentity;
pub use memory::MemorySettingsStore;
pub use wire::{SaveBatch, SendRequest, SendResponse};

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{SettingKey, SettingValue};

/// Host settings persistence service
#[async_trait]
pub trait SettingsStore: Send + Sync + 'static {
    /// Current persisted value of one key
    async fn get(&self, key: &SettingKey) -> Result<Option<SettingValue>, HostError>;

    /// Stage a value on the host side; it is committed by the next `save`
    async fn set_pending(&self, key: &SettingKey, value: SettingValue) -> Result<(), HostError>;

    /// Persist a batch (plus anything staged) atomically
    async fn save(&self, batch: &SaveBatch) -> Result<(), HostError>;

    /// Every persisted setting whose key starts with `prefix`
    async fn load_by_prefix(
        &self,
        prefix: &str,
    ) -> Result<BTreeMap<SettingKey, SettingValue>, HostError>;

    /// Revision counter bumped on every committed change
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// Host identity/session service
#[async_trait]
pub trait IdentityService: Send + Sync + 'static {
    /// Stored email address of the signed-in user, if any
    async fn signed_in_email(&self) -> Result<Option<String>, HostError>;
}

/// Host `send-email` endpoint.
///
/// Implementations should resolve delivery problems into a `SendResponse`
/// with `sent: false`; `Err` is reserved for the request never reaching the
/// endpoint.
#[async_trait]
pub trait MailEndpoint: Send + Sync + 'static {
    async fn send(&self, request: &SendRequest) -> Result<SendResponse, HostError>;
}
