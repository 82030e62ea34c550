//! UI helper functions for settings rendering
//!
//! Controls here are bound to an [`EditSession`] key rather than to a loose
//! `String`, so every edit goes through the session's field binding.

use eframe::egui::{self, RichText};

use crate::domain::SettingKey;
use crate::gui::theme::{
    ACCENT_GREEN, ACCENT_RED, ACCENT_YELLOW, BG_SECONDARY, TEXT_DIM, TEXT_MUTED, TEXT_PRIMARY,
};
use crate::session::EditSession;

/// Render a labeled text input bound to `key`
pub fn render_bound_text_field(
    ui: &mut egui::Ui,
    session: &mut EditSession,
    key: &str,
    width: f32,
    hint: Option<&str>,
    password: bool,
) {
    let enabled = !session.is_saving();
    let Some(mut binding) = session.binding(&SettingKey::new(key)) else {
        return;
    };
    let label = binding.field().label;
    let modified = binding.is_modified();
    let mut text = binding.text();

    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{}:", label)).color(TEXT_MUTED));
        let mut edit = egui::TextEdit::singleline(&mut text)
            .font(egui::TextStyle::Monospace)
            .text_color(TEXT_PRIMARY)
            .desired_width(width)
            .password(password);
        if let Some(h) = hint {
            edit = edit.hint_text(h);
        }
        if ui.add_enabled(enabled, edit).changed() {
            binding.on_change_text(&text);
        }
        render_modified_marker(ui, modified);
    });
}

/// Render a labeled checkbox bound to `key`, with description
pub fn render_bound_checkbox(
    ui: &mut egui::Ui,
    session: &mut EditSession,
    key: &str,
    description: &str,
) {
    let enabled = !session.is_saving();
    let Some(mut binding) = session.binding(&SettingKey::new(key)) else {
        return;
    };
    let label = binding.field().label;
    let modified = binding.is_modified();
    let mut checked = binding.checked();

    ui.horizontal(|ui| {
        if ui.add_enabled(enabled, egui::Checkbox::without_text(&mut checked)).changed() {
            binding.on_change(checked);
        }
        ui.label(RichText::new(label).color(TEXT_DIM));
        ui.label(RichText::new(description).small().color(TEXT_MUTED));
        render_modified_marker(ui, modified);
    });
}

fn render_modified_marker(ui: &mut egui::Ui, modified: bool) {
    if modified {
        ui.label(RichText::new("●").small().color(ACCENT_YELLOW))
            .on_hover_text("Unsaved change");
    }
}

/// Render a status message (success or error)
pub fn render_status_message(ui: &mut egui::Ui, status: Option<&(String, bool)>) {
    if let Some((msg, is_error)) = status {
        let color = if *is_error { ACCENT_RED } else { ACCENT_GREEN };
        ui.label(RichText::new(msg).color(color));
    }
}

/// Render a group heading inside a section
pub fn render_group_label(ui: &mut egui::Ui, label: &str) {
    ui.label(RichText::new(label).monospace().small().color(TEXT_DIM));
    ui.add_space(4.0);
}

/// Render a section frame with secondary background
pub fn render_section_frame<R>(
    ui: &mut egui::Ui,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::NONE
        .fill(BG_SECONDARY)
        .corner_radius(4.0)
        .inner_margin(12.0)
        .show(ui, add_contents)
        .inner
}
