//! Tests for the config file and the file-backed settings store

use smtp_panel::config::Config;
use smtp_panel::domain::{keys, SettingKey, SettingValue};
use smtp_panel::host::{FileSettingsStore, SaveBatch, SettingsStore};
use tempfile::TempDir;

#[test]
fn test_load_or_init_creates_default_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config::load_or_init(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config, Config::with_defaults());
    assert_eq!(
        config.settings.get(keys::PORT),
        Some(&SettingValue::Integer(25))
    );
    assert_eq!(config.host.message_id_domain, "critic");
}

#[test]
fn test_init_file_respects_force() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    assert!(Config::init_file(&path, false).unwrap());
    std::fs::write(&path, "[identity]\nemail = \"admin@example.com\"\n").unwrap();

    assert!(!Config::init_file(&path, false).unwrap());
    let kept = Config::from_file(&path).unwrap();
    assert_eq!(kept.identity.email.as_deref(), Some("admin@example.com"));

    assert!(Config::init_file(&path, true).unwrap());
    let replaced = Config::from_file(&path).unwrap();
    assert_eq!(replaced.identity.email, None);
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = Config::with_defaults();
    config.identity.email = Some("admin@example.com".to_string());
    config
        .settings
        .insert(keys::USE_SMTPS.to_string(), SettingValue::Bool(true));

    config.save_to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded, config);
    assert!(!dir.path().join("config.toml.tmp").exists());
}

#[test]
fn test_from_file_reports_parse_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[settings\n").unwrap();

    let err = Config::from_file(&path).unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[tokio::test]
async fn test_file_store_save_writes_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let config = Config::load_or_init(&path).unwrap();
    let store = FileSettingsStore::new(config, &path);
    let changes = store.subscribe();

    let batch: SaveBatch = [
        (SettingKey::new(keys::HOST), SettingValue::from("mail.example.com")),
        (SettingKey::new(keys::PORT), SettingValue::Integer(587)),
    ]
    .into_iter()
    .collect();
    store.save(&batch).await.unwrap();

    assert!(changes.has_changed().unwrap());
    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(
        reloaded.settings.get(keys::HOST),
        Some(&SettingValue::from("mail.example.com"))
    );
    assert_eq!(
        reloaded.settings.get(keys::PORT),
        Some(&SettingValue::Integer(587))
    );
    assert_eq!(
        store.get(&SettingKey::new(keys::PORT)).await.unwrap(),
        Some(SettingValue::Integer(587))
    );
}

#[tokio::test]
async fn test_file_store_keeps_values_when_write_fails() {
    let dir = TempDir::new().unwrap();
    // A directory in place of the file makes the final rename fail
    let path = dir.path().join("config.toml");
    std::fs::create_dir(&path).unwrap();
    let store = FileSettingsStore::new(Config::with_defaults(), &path);

    let batch: SaveBatch = [(SettingKey::new(keys::HOST), SettingValue::from("relay.example.com"))]
        .into_iter()
        .collect();
    let err = store.save(&batch).await.unwrap_err();

    assert!(matches!(err, smtp_panel::host::HostError::Io(_)));
    assert_eq!(
        store.get(&SettingKey::new(keys::HOST)).await.unwrap(),
        Some(SettingValue::from("localhost"))
    );
}

#[tokio::test]
async fn test_file_store_keeps_changes_saved_elsewhere() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let config = Config::load_or_init(&path).unwrap();
    let gui = FileSettingsStore::new(config.clone(), &path);
    let cli = FileSettingsStore::new(config, &path);

    let from_cli: SaveBatch = [(SettingKey::new(keys::HOST), SettingValue::from("relay.example.com"))]
        .into_iter()
        .collect();
    cli.save(&from_cli).await.unwrap();

    let from_gui: SaveBatch = [(SettingKey::new(keys::PORT), SettingValue::Integer(587))]
        .into_iter()
        .collect();
    gui.save(&from_gui).await.unwrap();

    let on_disk = Config::from_file(&path).unwrap();
    assert_eq!(
        on_disk.settings.get(keys::HOST),
        Some(&SettingValue::from("relay.example.com"))
    );
    assert_eq!(on_disk.settings.get(keys::PORT), Some(&SettingValue::Integer(587)));
    assert_eq!(
        gui.get(&SettingKey::new(keys::HOST)).await.unwrap(),
        Some(SettingValue::from("relay.example.com"))
    );
}

#[tokio::test]
async fn test_file_store_save_writes_staged_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let store = FileSettingsStore::new(Config::load_or_init(&path).unwrap(), &path);

    store
        .set_pending(&SettingKey::new(keys::USE_SMTPS), SettingValue::Bool(true))
        .await
        .unwrap();
    store.save(&SaveBatch::default()).await.unwrap();

    let on_disk = Config::from_file(&path).unwrap();
    assert_eq!(on_disk.settings.get(keys::USE_SMTPS), Some(&SettingValue::Bool(true)));
    assert_eq!(on_disk.settings.len(), 7);
}
