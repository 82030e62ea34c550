//! Host service handles injected into a panel

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::config::Config;
use crate::host::{IdentityService, MailEndpoint, SettingsStore};

/// Per-host options of the test-message action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelOptions {
    pub test_subject: String,
    pub message_id_domain: String,
}

impl PanelOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            test_subject: config.host.test_subject.clone(),
            message_id_domain: config.host.message_id_domain.clone(),
        }
    }
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Everything a panel needs from its host.
///
/// Background calls are spawned on `runtime`; the UI thread never blocks on
/// them.
#[derive(Clone)]
pub struct PanelServices {
    pub settings: Arc<dyn SettingsStore>,
    pub mail: Arc<dyn MailEndpoint>,
    pub identity: Arc<dyn IdentityService>,
    pub runtime: Handle,
    pub options: PanelOptions,
}
