//! SMTP panel rendering and host mounting
//!
//! Contains the top-level render function for the panel and its
//! [`SystemSettingsPanel`] implementation.

use std::sync::Arc;
use std::time::Instant;

use eframe::egui::{self, RichText};

use crate::extension::{PanelFactory, SystemSettingsPanel};
use crate::gui::theme::{TEXT_DIM, TEXT_PRIMARY};
use crate::panel::{PanelServices, SmtpPanel, SECTION_ID, SECTION_TITLE};

use super::helpers::render_section_frame;
use super::sections::{
    render_address_group, render_save_or_reset, render_security_group, render_sender_group,
    render_test_message_group,
};

/// Render the SMTP server configuration section
pub fn render_smtp_panel(ui: &mut egui::Ui, panel: &mut SmtpPanel) {
    ui.label(RichText::new(SECTION_TITLE).monospace().color(TEXT_PRIMARY));
    ui.add_space(8.0);

    if !panel.is_loaded() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Loading settings…").color(TEXT_DIM));
        });
    }

    render_section_frame(ui, |ui| {
        render_address_group(ui, panel.session_mut());
        ui.add_space(12.0);
        render_security_group(ui, panel.session_mut());
        ui.add_space(12.0);
        render_sender_group(ui, panel.session_mut());
    });

    ui.add_space(12.0);
    render_save_or_reset(ui, panel);

    ui.add_space(16.0);
    render_section_frame(ui, |ui| {
        render_test_message_group(ui, panel);
    });

    // Background completions arrive between frames
    if panel.in_flight() > 0 {
        ui.ctx().request_repaint();
    }

    ui.add_space(24.0);
    ui.separator();
    ui.add_space(16.0);
}

impl SystemSettingsPanel for SmtpPanel {
    fn section_id(&self) -> &str {
        SECTION_ID
    }

    fn title(&self) -> &str {
        SECTION_TITLE
    }

    fn poll(&mut self, now: Instant) {
        SmtpPanel::poll(self, now);
    }

    fn render(&mut self, ui: &mut egui::Ui) {
        render_smtp_panel(ui, self);
    }

    fn on_detach(&mut self) {
        SmtpPanel::on_detach(self);
    }
}

/// Factory registered in the `system-settings-panels` slot
pub fn smtp_panel_factory() -> PanelFactory {
    Arc::new(|services: &PanelServices| {
        Box::new(SmtpPanel::new(services.clone())) as Box<dyn SystemSettingsPanel>
    })
}
