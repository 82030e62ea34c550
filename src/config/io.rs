//! Configuration file I/O operations

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

/// Configuration written by `smtp-panel init`
pub const DEFAULT_CONFIG: &str = r#"# smtp-panel configuration
#
# The demo host keeps its persisted settings in the [settings] table below.
# The SMTP panel edits the smtp.* keys; Save writes them back to this file.

[host]
hostname = "localhost"
extension_id = "email-delivery"
test_subject = "Test message from Critic"
message_id_domain = "critic"
delivery_timeout_secs = 10

[identity]
# Default recipient for test messages
# email = "admin@example.com"

[settings]
"smtp.address.host" = "localhost"
"smtp.address.port" = 25
"smtp.credentials.username" = ""
"smtp.credentials.password" = ""
"smtp.use_smtps" = false
"smtp.use_starttls" = false
"smtp.sender" = ""
"#;

impl Config {
    /// Get the global config directory path (~/.smtp-panel/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".smtp-panel")
    }

    /// Get the global config file path (~/.smtp-panel/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Configuration equivalent to a freshly initialised file
    pub fn with_defaults() -> Self {
        // The embedded default is covered by a unit test; fall back to the
        // empty config rather than panic if it ever stops parsing.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// An exclusive lock on `<path>.lock` serialises writers (GUI and CLI),
    /// and the content goes through a temp file plus rename so a crash never
    /// leaves a truncated config behind.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_locked(path, &content)
    }

    /// Load the config at `path`, creating it from defaults when missing
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::init_file(path, false)?;
        }
        Self::from_file(path)
    }

    /// Write the default config to `path`.
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn init_file(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            return Ok(false);
        }
        write_locked(path, DEFAULT_CONFIG)?;
        tracing::info!("Created {}", path.display());
        Ok(true)
    }

    /// Re-read the config at `path` under the write lock, apply `update` and
    /// write the result back before releasing the lock.
    ///
    /// Changes another process saved since this one loaded the file are kept.
    /// A missing file starts from `fallback`.
    pub fn update_file<F>(path: &Path, fallback: &Config, update: F) -> Result<Config>
    where
        F: FnOnce(&mut Config),
    {
        let _lock = lock_config(path)?;

        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            fallback.clone()
        };
        update(&mut config);

        let content = toml::to_string_pretty(&config).with_context(|| "Failed to serialize config")?;
        write_atomic(path, &content)?;
        Ok(config)
    }
}

fn write_locked(path: &Path, content: &str) -> Result<()> {
    // Lock is released when the lock file is dropped
    let _lock = lock_config(path)?;
    write_atomic(path, content)
}

/// Take the exclusive config lock, creating the config directory if needed
fn lock_config(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
    }

    // Lock file is separate from the config so the rename cannot drop it
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    Ok(lock_file)
}

/// Write through a temp file and rename so readers never see a partial file
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    Ok(())
}
