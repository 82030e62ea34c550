//! Tests for the composed SMTP panel running against fake host services

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{relay_settings, services, RecordingStore, ScriptedEndpoint, SilentEndpoint};
use smtp_panel::domain::{keys, SettingKey, SettingValue};
use smtp_panel::host::SendResponse;
use smtp_panel::panel::SmtpPanel;
use smtp_panel::test_send::Outcome;

async fn loaded_panel(
    store: Arc<RecordingStore>,
    mail: Arc<dyn smtp_panel::host::MailEndpoint>,
    email: Option<&str>,
) -> SmtpPanel {
    let mut panel = SmtpPanel::new(services(store, mail, email));
    panel.run_until_idle().await;
    panel
}

#[tokio::test]
async fn test_panel_loads_settings_and_default_recipient() {
    let store = Arc::new(RecordingStore::new(relay_settings()));
    let panel = loaded_panel(store, Arc::new(ScriptedEndpoint::default()), Some("admin@example.com")).await;

    assert!(panel.is_loaded());
    assert_eq!(panel.recipient(), "admin@example.com");
    assert_eq!(
        panel.session().value(&SettingKey::new(keys::HOST)),
        Some(SettingValue::from("mail.example.com"))
    );
    assert!(!panel.session().is_modified());
}

#[tokio::test]
async fn test_panel_without_identity_email_disables_send() {
    let store = Arc::new(RecordingStore::new(relay_settings()));
    let endpoint = Arc::new(ScriptedEndpoint::default());
    let mut panel = loaded_panel(store, endpoint.clone(), None).await;

    assert_eq!(panel.recipient(), "");
    assert!(!panel.can_send());
    panel.request_send();
    panel.run_until_idle().await;
    assert_eq!(endpoint.request_count(), 0);
}

#[tokio::test]
async fn test_panel_save_reports_success() {
    let store = Arc::new(RecordingStore::new(relay_settings()));
    let mut panel = loaded_panel(store.clone(), Arc::new(ScriptedEndpoint::default()), None).await;

    panel
        .session_mut()
        .binding(&SettingKey::new(keys::PORT))
        .unwrap()
        .on_change_text("587");
    panel.request_save();
    assert!(panel.session().is_saving());
    panel.run_until_idle().await;

    assert!(!panel.session().is_saving());
    assert!(!panel.session().is_modified());
    assert_eq!(store.value(keys::PORT), Some(SettingValue::Integer(587)));
    assert_eq!(panel.notice(), Some(&("Settings saved!".to_string(), false)));
}

#[tokio::test]
async fn test_panel_save_failure_keeps_edits() {
    let store = Arc::new(RecordingStore::new(relay_settings()));
    store.set_failing(true);
    let mut panel = loaded_panel(store.clone(), Arc::new(ScriptedEndpoint::default()), None).await;

    panel
        .session_mut()
        .binding(&SettingKey::new(keys::HOST))
        .unwrap()
        .on_change("relay.example.com");
    panel.request_save();
    panel.run_until_idle().await;

    assert!(panel.session().is_modified());
    assert!(panel.session().can_save());
    let (message, is_error) = panel.notice().unwrap();
    assert!(is_error);
    assert!(message.contains("settings service down"));
    assert_eq!(store.value(keys::HOST), Some(SettingValue::from("mail.example.com")));
}

#[tokio::test]
async fn test_panel_save_without_changes_makes_no_call() {
    let store = Arc::new(RecordingStore::new(relay_settings()));
    let mut panel = loaded_panel(store.clone(), Arc::new(ScriptedEndpoint::default()), None).await;

    panel.request_save();
    panel.run_until_idle().await;

    assert_eq!(store.save_count(), 0);
    assert!(panel.notice().is_none());
}

#[tokio::test]
async fn test_panel_test_send_outcomes() {
    let store = Arc::new(RecordingStore::new(relay_settings()));
    let endpoint = Arc::new(ScriptedEndpoint::answering([Ok(SendResponse::failed(
        "mailbox unavailable",
    ))]));
    let mut panel = loaded_panel(store, endpoint.clone(), Some("bad@example.com")).await;

    panel.request_send();
    assert!(panel.test().is_sending());
    assert!(!panel.can_send());
    panel.run_until_idle().await;

    assert_eq!(
        panel.test().outcome(),
        Outcome::Failure("mailbox unavailable".to_string())
    );
    assert_eq!(endpoint.request_count(), 1);
    assert_eq!(endpoint.requests.lock().unwrap()[0].recipient, "bad@example.com");

    panel.dismiss_outcome();
    assert_eq!(panel.test().outcome(), Outcome::None);

    panel.set_recipient("a@example.com");
    panel.request_send();
    panel.run_until_idle().await;
    assert_eq!(
        panel.test().outcome(),
        Outcome::Success("a@example.com".to_string())
    );

    panel.poll(Instant::now() + Duration::from_secs(6));
    assert_eq!(panel.test().outcome(), Outcome::None);
}

#[tokio::test]
async fn test_panel_reflects_external_changes() {
    let store = Arc::new(RecordingStore::new(relay_settings()));
    let mut panel = loaded_panel(store.clone(), Arc::new(ScriptedEndpoint::default()), None).await;

    store.inner.set_external(keys::HOST, "other.example.com");
    panel.poll(Instant::now());
    assert_eq!(panel.in_flight(), 1);
    panel.run_until_idle().await;

    assert_eq!(
        panel.session().value(&SettingKey::new(keys::HOST)),
        Some(SettingValue::from("other.example.com"))
    );
}

#[tokio::test]
async fn test_detach_aborts_in_flight_send() {
    let store = Arc::new(RecordingStore::new(relay_settings()));
    let mut panel = loaded_panel(store, Arc::new(SilentEndpoint), Some("a@example.com")).await;

    panel.request_send();
    assert_eq!(panel.in_flight(), 1);

    panel.on_detach();
    panel.on_detach();

    assert_eq!(panel.in_flight(), 0);
    assert!(!panel.can_send());
    panel.request_send();
    panel.run_until_idle().await;
    assert_eq!(panel.in_flight(), 0);
}
