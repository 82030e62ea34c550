//! Configuration loading and management

mod io;
mod settings;

pub use io::DEFAULT_CONFIG;
pub use settings::{HostConfig, IdentityConfig};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{SettingKey, SettingValue};

/// Main configuration structure of the demo host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Host identity and extension wiring
    #[serde(default)]
    pub host: HostConfig,

    /// Signed-in user as seen by the panel
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Persisted host settings, keyed by dotted setting key
    #[serde(default)]
    pub settings: BTreeMap<String, SettingValue>,
}

impl Config {
    /// Persisted settings as typed keys
    pub fn setting_values(&self) -> impl Iterator<Item = (SettingKey, SettingValue)> + '_ {
        self.settings
            .iter()
            .map(|(k, v)| (SettingKey::new(k.as_str()), v.clone()))
    }

    /// Overlay `values` on the `[settings]` table; other keys are kept
    pub fn merge_setting_values(&mut self, values: &BTreeMap<SettingKey, SettingValue>) {
        self.settings.extend(
            values
                .iter()
                .map(|(k, v)| (k.as_str().to_string(), v.clone())),
        );
    }
}
