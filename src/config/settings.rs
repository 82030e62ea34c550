//! Host and identity configuration types

use serde::{Deserialize, Serialize};

/// How the demo host presents itself and mounts the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Hostname used for the fallback sender address (`critic@<hostname>`)
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Identifier the panel registers under in the extension slot
    #[serde(default = "default_extension_id")]
    pub extension_id: String,

    /// Subject line of test messages
    #[serde(default = "default_test_subject")]
    pub test_subject: String,

    /// Domain suffix of generated test message ids
    #[serde(default = "default_message_id_domain")]
    pub message_id_domain: String,

    /// Seconds the mail endpoint waits for relay feedback
    #[serde(default = "default_delivery_timeout_secs")]
    pub delivery_timeout_secs: u64,
}

/// Signed-in user of the demo host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Stored email address; default recipient for test messages
    #[serde(default)]
    pub email: Option<String>,
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_extension_id() -> String {
    "email-delivery".to_string()
}

fn default_test_subject() -> String {
    "Test message from Critic".to_string()
}

fn default_message_id_domain() -> String {
    "critic".to_string()
}

fn default_delivery_timeout_secs() -> u64 {
    10
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            extension_id: default_extension_id(),
            test_subject: default_test_subject(),
            message_id_domain: default_message_id_domain(),
            delivery_timeout_secs: default_delivery_timeout_secs(),
        }
    }
}
