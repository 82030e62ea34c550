//! Extension slots and the panel's registration lifecycle
//!
//! The host exposes named slots; an extension puts a panel factory into the
//! `system-settings-panels` slot under its own identifier. [`PanelExtension`]
//! makes that explicit: `on_attach` registers once, `on_detach` unregisters,
//! and dropping the extension detaches it so no stale registration survives.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use eframe::egui;
use tracing::{debug, info, warn};

use crate::panel::PanelServices;

/// Slot listing the panels of the system settings view
pub const SYSTEM_SETTINGS_PANELS: &str = "system-settings-panels";

/// A panel the host can mount in its system settings view
pub trait SystemSettingsPanel: Send {
    /// Stable section identifier (`email-delivery`)
    fn section_id(&self) -> &str;

    fn title(&self) -> &str;

    /// Apply finished background work and timers; called once per frame
    fn poll(&mut self, now: Instant);

    fn render(&mut self, ui: &mut egui::Ui);

    /// Called before the host drops the panel
    fn on_detach(&mut self) {}
}

/// Builds a panel instance from the host's service handles
pub type PanelFactory = Arc<dyn Fn(&PanelServices) -> Box<dyn SystemSettingsPanel> + Send + Sync>;

/// Host extension registration point
pub trait ExtensionRegistry: Send + Sync {
    /// Register `factory` under `extension_id` in `slot`.
    ///
    /// Returns `false` if the id was already registered there.
    fn register(&self, slot: &str, extension_id: &str, factory: PanelFactory) -> bool;

    /// Remove a registration. Returns `false` if there was none.
    fn unregister(&self, slot: &str, extension_id: &str) -> bool;

    /// Registrations in `slot`, ordered by extension id
    fn items(&self, slot: &str) -> Vec<(String, PanelFactory)>;
}

/// In-memory registry used by the demo host
#[derive(Default)]
pub struct SlotRegistry {
    slots: Mutex<BTreeMap<String, BTreeMap<String, PanelFactory>>>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, slot: &str) -> usize {
        self.lock().get(slot).map_or(0, BTreeMap::len)
    }

    pub fn contains(&self, slot: &str, extension_id: &str) -> bool {
        self.lock()
            .get(slot)
            .is_some_and(|items| items.contains_key(extension_id))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, BTreeMap<String, PanelFactory>>> {
        self.slots.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl ExtensionRegistry for SlotRegistry {
    fn register(&self, slot: &str, extension_id: &str, factory: PanelFactory) -> bool {
        let mut slots = self.lock();
        let items = slots.entry(slot.to_string()).or_default();
        if items.contains_key(extension_id) {
            return false;
        }
        items.insert(extension_id.to_string(), factory);
        true
    }

    fn unregister(&self, slot: &str, extension_id: &str) -> bool {
        let mut slots = self.lock();
        let Some(items) = slots.get_mut(slot) else {
            return false;
        };
        let removed = items.remove(extension_id).is_some();
        if items.is_empty() {
            slots.remove(slot);
        }
        removed
    }

    fn items(&self, slot: &str) -> Vec<(String, PanelFactory)> {
        self.lock()
            .get(slot)
            .map(|items| {
                items
                    .iter()
                    .map(|(id, f)| (id.clone(), Arc::clone(f)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Registration of one panel factory, tied to an attach/detach lifecycle
pub struct PanelExtension {
    extension_id: String,
    registry: Arc<dyn ExtensionRegistry>,
    factory: PanelFactory,
    attached: bool,
}

impl PanelExtension {
    pub fn new(
        extension_id: impl Into<String>,
        registry: Arc<dyn ExtensionRegistry>,
        factory: PanelFactory,
    ) -> Self {
        Self {
            extension_id: extension_id.into(),
            registry,
            factory,
            attached: false,
        }
    }

    pub fn extension_id(&self) -> &str {
        &self.extension_id
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Register the panel. Repeated calls register once.
    ///
    /// If another owner already holds the id the extension stays detached,
    /// so a later `on_detach` never removes a registration it did not make.
    pub fn on_attach(&mut self) {
        if self.attached {
            debug!("{} already attached", self.extension_id);
            return;
        }
        if self.registry.register(
            SYSTEM_SETTINGS_PANELS,
            &self.extension_id,
            Arc::clone(&self.factory),
        ) {
            info!("{}::attached to {}", self.extension_id, SYSTEM_SETTINGS_PANELS);
            self.attached = true;
        } else {
            warn!(
                "{} is already registered in {} by another owner, not attaching",
                self.extension_id, SYSTEM_SETTINGS_PANELS
            );
        }
    }

    /// Unregister the panel. Safe to call any number of times.
    pub fn on_detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        if self
            .registry
            .unregister(SYSTEM_SETTINGS_PANELS, &self.extension_id)
        {
            info!("{}::detached from {}", self.extension_id, SYSTEM_SETTINGS_PANELS);
        }
    }
}

impl Drop for PanelExtension {
    fn drop(&mut self) {
        self.on_detach();
    }
}
