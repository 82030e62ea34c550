//! Demo host wiring
//!
//! Assembles the host services the binary offers the panel: settings backed
//! by the config file, identity from `[identity]`, the lettre mail endpoint
//! and an in-memory extension registry.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use crate::config::Config;
use crate::extension::{ExtensionRegistry, PanelExtension, SlotRegistry};
use crate::gui::smtp_panel_factory;
use crate::host::{FileSettingsStore, StaticIdentity};
use crate::mail::SmtpEndpoint;
use crate::panel::{PanelOptions, PanelServices};

/// Services of the demo host
pub struct DemoHost {
    pub config: Config,
    pub settings: Arc<FileSettingsStore>,
    pub registry: Arc<SlotRegistry>,
    pub services: PanelServices,
}

impl DemoHost {
    pub fn new(config: Config, config_path: impl Into<PathBuf>, runtime: Handle) -> Self {
        let settings = Arc::new(FileSettingsStore::new(config.clone(), config_path));
        let mail = Arc::new(SmtpEndpoint::new(
            settings.clone(),
            config.host.hostname.clone(),
            Duration::from_secs(config.host.delivery_timeout_secs),
        ));
        let identity = Arc::new(StaticIdentity::new(config.identity.email.clone()));

        let services = PanelServices {
            settings: settings.clone(),
            mail,
            identity,
            runtime,
            options: PanelOptions::from_config(&config),
        };

        Self {
            config,
            settings,
            registry: Arc::new(SlotRegistry::new()),
            services,
        }
    }

    /// The SMTP panel extension, not yet attached
    pub fn smtp_extension(&self) -> PanelExtension {
        let registry: Arc<dyn ExtensionRegistry> = self.registry.clone();
        PanelExtension::new(
            self.config.host.extension_id.clone(),
            registry,
            smtp_panel_factory(),
        )
    }
}
