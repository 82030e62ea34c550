//! Address group: relay hostname and port

use eframe::egui;

use crate::domain::keys;
use crate::session::EditSession;

use super::super::helpers::{render_bound_text_field, render_group_label};

/// Render the Address group (hostname, port)
pub fn render_address_group(ui: &mut egui::Ui, session: &mut EditSession) {
    render_group_label(ui, "Address");
    ui.horizontal_wrapped(|ui| {
        render_bound_text_field(ui, session, keys::HOST, 260.0, Some("mail.example.com"), false);
        ui.add_space(12.0);
        render_bound_text_field(ui, session, keys::PORT, 60.0, Some("25"), false);
    });
}
