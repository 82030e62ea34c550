//! Show command implementation

use anyhow::Result;

use smtp_panel::demo::DemoHost;
use smtp_panel::domain::{keys, SettingValue};
use smtp_panel::host::SettingsStore;

/// Print the persisted `smtp.*` settings
pub async fn show_command(host: &DemoHost) -> Result<()> {
    let values = host.settings.load_by_prefix(keys::SMTP_PREFIX).await?;

    if values.is_empty() {
        println!("No SMTP settings stored.");
        return Ok(());
    }

    println!("SMTP settings ({}):\n", host.settings.path().display());
    for (key, value) in &values {
        let shown = match value {
            SettingValue::Text(s) if key.as_str() == keys::PASSWORD && !s.is_empty() => {
                "********".to_string()
            }
            SettingValue::Text(s) => format!("{:?}", s),
            other => other.to_string(),
        };
        println!("  {:<28} {}", key, shown);
    }

    Ok(())
}
