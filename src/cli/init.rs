//! Init command implementation

use anyhow::Result;
use std::path::Path;

use smtp_panel::config::Config;

/// Write the default configuration file
pub async fn init_command(config_path: &Path, force: bool) -> Result<()> {
    if Config::init_file(config_path, force)? {
        println!("Created {}", config_path.display());
        println!();
        println!("Next steps:");
        println!("  1. Set the relay: smtp-panel set smtp.address.host mail.example.com");
        println!("  2. Open the settings window: smtp-panel gui");
    } else {
        println!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    Ok(())
}
