//! eframe::App implementation for SettingsApp
//!
//! Contains the main update loop that runs every frame.

use super::app::SettingsApp;
use eframe::egui;

impl eframe::App for SettingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pick up registrations made or removed since the last frame
        self.sync_panels();

        self.render(ctx);
    }
}

impl Drop for SettingsApp {
    fn drop(&mut self) {
        // Panels first, so no completion lands after their registration is gone
        self.shutdown();
    }
}
