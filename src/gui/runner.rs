//! GUI runner - launches the system settings window

use anyhow::Result;
use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use std::path::PathBuf;
use tokio::runtime::Handle;
use tracing::info;

use super::app::SettingsApp;
use crate::config::Config;
use crate::demo::DemoHost;

/// Run the settings window against the demo host.
///
/// Blocks the calling thread until the window closes; host calls run on
/// `runtime`.
pub fn run_gui(config: Config, config_path: PathBuf, runtime: Handle) -> Result<()> {
    info!("Starting settings window (config: {})", config_path.display());

    let host = DemoHost::new(config, config_path, runtime);
    let extension = host.smtp_extension();
    let app = SettingsApp::new(host.registry.clone(), host.services.clone(), vec![extension]);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([520.0, 400.0])
            .with_resizable(true),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        "smtp-panel",
        options,
        Box::new(|cc| {
            configure_fonts(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))?;

    Ok(())
}

/// Configure fonts with system fallbacks for the symbols used in labels
fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();

    #[cfg(target_os = "macos")]
    let font_fallbacks: &[(&str, &str)] = &[("symbols", "/System/Library/Fonts/Apple Symbols.ttf")];

    #[cfg(target_os = "windows")]
    let font_fallbacks: &[(&str, &str)] = &[("symbols", "C:\\Windows\\Fonts\\seguisym.ttf")];

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let font_fallbacks: &[(&str, &str)] = &[
        ("symbols", "/usr/share/fonts/truetype/noto/NotoSansSymbols2-Regular.ttf"),
        ("dejavu", "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
    ];

    for (name, path) in font_fallbacks {
        if let Ok(font_data) = std::fs::read(path) {
            fonts
                .font_data
                .insert((*name).to_owned(), FontData::from_owned(font_data).into());

            for family in [FontFamily::Proportional, FontFamily::Monospace] {
                if let Some(list) = fonts.families.get_mut(&family) {
                    list.push((*name).to_owned());
                }
            }

            info!("Loaded fallback font '{}' from: {}", name, path);
        }
    }

    ctx.set_fonts(fonts);
}
