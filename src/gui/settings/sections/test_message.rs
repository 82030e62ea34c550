//! Send test message subform

use std::time::Instant;

use eframe::egui::{self, RichText};

use crate::gui::theme::{ACCENT_GREEN, ACCENT_RED, ACCENT_YELLOW, BG_HIGHLIGHT, TEXT_MUTED, TEXT_PRIMARY};
use crate::panel::SmtpPanel;
use crate::test_send::Outcome;

use super::super::helpers::render_group_label;

/// Render recipient input, Send button and the outcome banner
pub fn render_test_message_group(ui: &mut egui::Ui, panel: &mut SmtpPanel) {
    render_group_label(ui, "Send test message");

    ui.horizontal(|ui| {
        ui.label(RichText::new("Recipient:").color(TEXT_MUTED));
        let mut recipient = panel.recipient().to_string();
        let edit = egui::TextEdit::singleline(&mut recipient)
            .font(egui::TextStyle::Monospace)
            .text_color(TEXT_PRIMARY)
            .desired_width(240.0)
            .hint_text("you@example.com");
        if ui.add(edit).changed() {
            panel.set_recipient(recipient);
        }

        if ui
            .add_enabled(panel.can_send(), egui::Button::new("Send"))
            .clicked()
        {
            panel.request_send();
        }

        if panel.test().is_sending() {
            ui.spinner();
            ui.label(RichText::new("Sending…").color(ACCENT_YELLOW));
        }
    });

    let outcome = panel.test().outcome();
    if outcome == Outcome::None {
        return;
    }

    ui.add_space(8.0);
    let remaining = panel.test().remaining(Instant::now());
    egui::Frame::NONE
        .fill(BG_HIGHLIGHT)
        .corner_radius(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                match &outcome {
                    Outcome::Success(recipient) => {
                        ui.label(
                            RichText::new(format!("Test message sent to {}!", recipient))
                                .color(ACCENT_GREEN),
                        );
                    }
                    Outcome::Failure(reason) => {
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new("Failed to send test message...").color(ACCENT_RED),
                            );
                            ui.label(RichText::new(reason).monospace().small().color(TEXT_PRIMARY));
                        });
                    }
                    Outcome::None => {}
                }
                if ui.small_button("Dismiss").clicked() {
                    panel.dismiss_outcome();
                }
            });
        });

    // Keep frames coming so the banner clears itself on time
    if let Some(remaining) = remaining {
        ui.ctx().request_repaint_after(remaining);
    }
}
