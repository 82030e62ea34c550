//! Connection security group: credentials and transport toggles

use eframe::egui::{self, RichText};

use crate::domain::{keys, SettingKey};
use crate::gui::theme::TEXT_MUTED;
use crate::session::EditSession;

use super::super::helpers::{render_bound_checkbox, render_bound_text_field, render_group_label};

/// Render the Connection security group
pub fn render_security_group(ui: &mut egui::Ui, session: &mut EditSession) {
    render_group_label(ui, "Connection security");

    render_bound_text_field(ui, session, keys::USERNAME, 180.0, Some("optional"), false);
    render_bound_text_field(ui, session, keys::PASSWORD, 180.0, None, true);
    ui.add_space(8.0);

    render_bound_checkbox(ui, session, keys::USE_SMTPS, "(TLS from connect, usually port 465)");
    render_bound_checkbox(ui, session, keys::USE_STARTTLS, "(upgrade after connect, usually port 587)");

    let checked = |key: &str| {
        session
            .value(&SettingKey::new(key))
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    };
    if checked(keys::USE_SMTPS) && checked(keys::USE_STARTTLS) {
        ui.label(
            RichText::new("Both enabled: the relay connection uses SMTPS.")
                .small()
                .color(TEXT_MUTED),
        );
    }
}
