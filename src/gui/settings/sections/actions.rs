//! Save/Reset control pair

use eframe::egui::{self, RichText};

use crate::gui::theme::{ACCENT_CYAN, ACCENT_GREEN, ACCENT_YELLOW};
use crate::panel::SmtpPanel;

use super::super::helpers::render_status_message;

/// Render Save and Reset, enabled from the session's modified/saving state
pub fn render_save_or_reset(ui: &mut egui::Ui, panel: &mut SmtpPanel) {
    let can_save = panel.session().can_save();
    let can_reset = panel.session().can_reset();
    let saving = panel.session().is_saving();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(can_save, egui::Button::new(RichText::new("Save").color(ACCENT_GREEN)))
            .clicked()
        {
            panel.request_save();
        }

        ui.add_space(8.0);

        if ui
            .add_enabled(can_reset, egui::Button::new(RichText::new("Reset").color(ACCENT_CYAN)))
            .on_hover_text("Discard unsaved changes")
            .clicked()
        {
            panel.reset();
        }

        if saving {
            ui.add_space(8.0);
            ui.spinner();
            ui.label(RichText::new("Saving…").color(ACCENT_YELLOW));
        }
    });

    if panel.notice().is_some() {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            render_status_message(ui, panel.notice());
            if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                panel.dismiss_notice();
            }
        });
    }
}
