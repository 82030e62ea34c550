//! Sender group

use eframe::egui::{self, RichText};

use crate::domain::keys;
use crate::gui::theme::TEXT_MUTED;
use crate::session::EditSession;

use super::super::helpers::{render_bound_text_field, render_group_label};

/// Render the Sender group
pub fn render_sender_group(ui: &mut egui::Ui, session: &mut EditSession) {
    render_group_label(ui, "Sender");
    render_bound_text_field(ui, session, keys::SENDER, 260.0, Some("critic@example.com"), false);
    ui.label(
        RichText::new("Leave empty to use the system email address.")
            .small()
            .color(TEXT_MUTED),
    );
}
