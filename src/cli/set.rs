//! Set command implementation

use anyhow::{bail, Result};

use smtp_panel::demo::DemoHost;
use smtp_panel::domain::{smtp_fields, FieldSpec, SettingKey, SettingKind};
use smtp_panel::host::{SaveBatch, SettingsStore};

/// Stage one setting on the host and save it
pub async fn set_command(host: &DemoHost, key: &str, raw: &str) -> Result<()> {
    let key = SettingKey::new(key);
    let field = smtp_fields()
        .into_iter()
        .find(|f| f.key == key)
        .unwrap_or_else(|| FieldSpec::new(key.clone(), SettingKind::Text, "Value"));

    let value = field.coerce(raw);
    if let Err(message) = field.validate(&value) {
        bail!("{}: {}", key, message);
    }

    host.settings.set_pending(&key, value.clone()).await?;
    host.settings.save(&SaveBatch::default()).await?;

    println!("{} = {}", key, value);
    Ok(())
}
