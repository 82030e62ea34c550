//! Dotted setting keys

use std::fmt;

use serde::{Deserialize, Serialize};

/// A host setting identifier such as `smtp.address.host`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingKey(String);

impl SettingKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First dotted segment (`smtp` for `smtp.address.host`)
    pub fn prefix(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Segment-wise prefix test: `smtp.address` matches `smtp.address.host`
    /// but not `smtp.addressbook`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return true;
        }
        match self.0.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for SettingKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl AsRef<str> for SettingKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Keys owned by the mail relay panel and read by the mail endpoint.
pub mod keys {
    pub const SMTP_PREFIX: &str = "smtp";
    pub const HOST: &str = "smtp.address.host";
    pub const PORT: &str = "smtp.address.port";
    pub const USERNAME: &str = "smtp.credentials.username";
    pub const PASSWORD: &str = "smtp.credentials.password";
    pub const USE_SMTPS: &str = "smtp.use_smtps";
    pub const USE_STARTTLS: &str = "smtp.use_starttls";
    pub const SENDER: &str = "smtp.sender";

    /// Host-wide settings consulted for the sender fallback.
    pub const SYSTEM_EMAIL: &str = "system.email";
    pub const SYSTEM_HOSTNAME: &str = "system.hostname";
}
