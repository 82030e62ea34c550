//! Native settings window
//!
//! Hosts the system settings view in an egui window: every panel registered
//! in the `system-settings-panels` slot is mounted, polled and rendered once
//! per frame.

mod app;
mod app_eframe;
pub mod runner;
pub mod settings;
pub mod theme;

pub use app::SettingsApp;
pub use runner::run_gui;
pub use settings::{render_smtp_panel, smtp_panel_factory};
