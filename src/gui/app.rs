//! System settings window hosting the registered panels

use std::sync::Arc;
use std::time::Instant;

use eframe::egui::{self, RichText, ScrollArea};
use tracing::{debug, info};

use super::theme::{BG_PRIMARY, TEXT_DIM, TEXT_PRIMARY};
use crate::extension::{ExtensionRegistry, PanelExtension, SystemSettingsPanel, SYSTEM_SETTINGS_PANELS};
use crate::panel::PanelServices;

/// A panel instance created from a slot registration
struct MountedPanel {
    extension_id: String,
    panel: Box<dyn SystemSettingsPanel>,
}

/// Host window rendering every panel registered in `system-settings-panels`
pub struct SettingsApp {
    registry: Arc<dyn ExtensionRegistry>,
    services: PanelServices,
    extensions: Vec<PanelExtension>,
    mounted: Vec<MountedPanel>,
}

impl SettingsApp {
    /// Attach `extensions` and build the window around `registry`
    pub fn new(
        registry: Arc<dyn ExtensionRegistry>,
        services: PanelServices,
        mut extensions: Vec<PanelExtension>,
    ) -> Self {
        for extension in &mut extensions {
            extension.on_attach();
        }
        Self {
            registry,
            services,
            extensions,
            mounted: Vec::new(),
        }
    }

    /// Mount newly registered panels and tear down unregistered ones
    pub(crate) fn sync_panels(&mut self) {
        let items = self.registry.items(SYSTEM_SETTINGS_PANELS);

        self.mounted.retain_mut(|m| {
            let keep = items.iter().any(|(id, _)| *id == m.extension_id);
            if !keep {
                debug!("Unmounting panel {}", m.extension_id);
                m.panel.on_detach();
            }
            keep
        });

        for (id, factory) in items {
            if !self.mounted.iter().any(|m| m.extension_id == id) {
                info!("Mounting panel {}", id);
                let panel = factory(&self.services);
                self.mounted.push(MountedPanel {
                    extension_id: id,
                    panel,
                });
            }
        }
    }

    pub(crate) fn render(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        for mounted in &mut self.mounted {
            mounted.panel.poll(now);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BG_PRIMARY).inner_margin(16.0))
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("⚙ SYSTEM SETTINGS")
                        .monospace()
                        .size(18.0)
                        .color(TEXT_PRIMARY),
                );
                ui.add_space(16.0);

                if self.mounted.is_empty() {
                    ui.label(RichText::new("No settings panels registered.").color(TEXT_DIM));
                    return;
                }

                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for mounted in &mut self.mounted {
                            ui.push_id(mounted.panel.section_id().to_string(), |ui| {
                                mounted.panel.render(ui);
                            });
                        }
                    });
            });
    }

    /// Detach every panel and extension
    pub(crate) fn shutdown(&mut self) {
        for mounted in &mut self.mounted {
            mounted.panel.on_detach();
        }
        self.mounted.clear();
        for extension in &mut self.extensions {
            extension.on_detach();
        }
    }
}
