//! Colors for the settings window
//!
//! Amber-on-charcoal palette; accents mark the state of the mail relay
//! controls (saved, failed, sending).

use eframe::egui::Color32;

/// Window background
pub const BG_PRIMARY: Color32 = Color32::from_rgb(18, 20, 24);
/// Section frames
pub const BG_SECONDARY: Color32 = Color32::from_rgb(24, 28, 34);
/// Outcome banners
pub const BG_HIGHLIGHT: Color32 = Color32::from_rgb(32, 40, 52);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 176, 0);
pub const TEXT_DIM: Color32 = Color32::from_rgb(180, 130, 50);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 85, 60);

pub const ACCENT_CYAN: Color32 = Color32::from_rgb(0, 255, 200);
pub const ACCENT_GREEN: Color32 = Color32::from_rgb(80, 255, 120);
pub const ACCENT_RED: Color32 = Color32::from_rgb(255, 80, 80);
/// Pending edit marker and in-flight spinner label
pub const ACCENT_YELLOW: Color32 = Color32::from_rgb(255, 200, 50);
