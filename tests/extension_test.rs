//! Tests for panel registration in the system settings slot

mod common;

use std::sync::Arc;
use std::time::Instant;

use common::{relay_settings, services, RecordingStore, ScriptedEndpoint};
use smtp_panel::extension::{
    ExtensionRegistry, PanelExtension, SlotRegistry, SYSTEM_SETTINGS_PANELS,
};
use smtp_panel::gui::smtp_panel_factory;
use smtp_panel::panel::{SECTION_ID, SECTION_TITLE};

fn extension(registry: &Arc<SlotRegistry>) -> PanelExtension {
    PanelExtension::new("email-delivery", registry.clone(), smtp_panel_factory())
}

#[test]
fn test_attach_registers_once() {
    let registry = Arc::new(SlotRegistry::new());
    let mut ext = extension(&registry);

    ext.on_attach();
    ext.on_attach();

    assert!(ext.is_attached());
    assert_eq!(registry.len(SYSTEM_SETTINGS_PANELS), 1);
    assert!(registry.contains(SYSTEM_SETTINGS_PANELS, "email-delivery"));
}

#[test]
fn test_detach_is_idempotent() {
    let registry = Arc::new(SlotRegistry::new());
    let mut ext = extension(&registry);
    ext.on_attach();

    ext.on_detach();
    ext.on_detach();

    assert!(!ext.is_attached());
    assert_eq!(registry.len(SYSTEM_SETTINGS_PANELS), 0);
    assert!(!registry.unregister(SYSTEM_SETTINGS_PANELS, "email-delivery"));
}

#[test]
fn test_detach_before_attach_is_noop() {
    let registry = Arc::new(SlotRegistry::new());
    let mut ext = extension(&registry);

    ext.on_detach();

    assert_eq!(registry.len(SYSTEM_SETTINGS_PANELS), 0);
}

#[test]
fn test_drop_unregisters() {
    let registry = Arc::new(SlotRegistry::new());
    {
        let mut ext = extension(&registry);
        ext.on_attach();
        assert_eq!(registry.len(SYSTEM_SETTINGS_PANELS), 1);
    }
    assert_eq!(registry.len(SYSTEM_SETTINGS_PANELS), 0);
}

#[test]
fn test_reattach_after_detach() {
    let registry = Arc::new(SlotRegistry::new());
    let mut ext = extension(&registry);

    ext.on_attach();
    ext.on_detach();
    ext.on_attach();

    assert_eq!(registry.len(SYSTEM_SETTINGS_PANELS), 1);
}

#[test]
fn test_attach_leaves_foreign_registration_alone() {
    let registry = Arc::new(SlotRegistry::new());
    let foreign = smtp_panel_factory();
    assert!(registry.register(SYSTEM_SETTINGS_PANELS, "email-delivery", foreign.clone()));

    let mut ext = extension(&registry);
    ext.on_attach();
    assert!(!ext.is_attached());

    ext.on_detach();
    drop(ext);

    assert!(registry.contains(SYSTEM_SETTINGS_PANELS, "email-delivery"));
    let items = registry.items(SYSTEM_SETTINGS_PANELS);
    assert_eq!(items.len(), 1);
    assert!(Arc::ptr_eq(&items[0].1, &foreign));
}

#[test]
fn test_registry_rejects_duplicate_ids() {
    let registry = SlotRegistry::new();

    assert!(registry.register(SYSTEM_SETTINGS_PANELS, "email-delivery", smtp_panel_factory()));
    assert!(!registry.register(SYSTEM_SETTINGS_PANELS, "email-delivery", smtp_panel_factory()));
    assert!(registry.register("other-slot", "email-delivery", smtp_panel_factory()));

    assert_eq!(registry.len(SYSTEM_SETTINGS_PANELS), 1);
    assert_eq!(registry.len("other-slot"), 1);
    assert!(registry.items("missing-slot").is_empty());
}

#[tokio::test]
async fn test_registered_factory_builds_smtp_panel() {
    let registry = Arc::new(SlotRegistry::new());
    let mut ext = extension(&registry);
    ext.on_attach();

    let store = Arc::new(RecordingStore::new(relay_settings()));
    let svc = services(store, Arc::new(ScriptedEndpoint::default()), None);

    let items = registry.items(SYSTEM_SETTINGS_PANELS);
    assert_eq!(items.len(), 1);
    let (id, factory) = &items[0];
    assert_eq!(id, "email-delivery");

    let mut panel = (**factory)(&svc);
    assert_eq!(panel.section_id(), SECTION_ID);
    assert_eq!(panel.title(), SECTION_TITLE);
    panel.poll(Instant::now());
    panel.on_detach();
}
