use thiserror::Error;

use crate::domain::SettingKey;
use crate::host::HostError;

/// Why a save did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{key}: {message}")]
    Invalid { key: SettingKey, message: String },

    #[error("Failed to save settings: {0}")]
    Save(#[from] HostError),
}
