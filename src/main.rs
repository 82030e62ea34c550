use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use smtp_panel::config::Config;
use smtp_panel::demo::DemoHost;

mod cli;

#[derive(Parser)]
#[command(name = "smtp-panel")]
#[command(about = "Mail relay settings panel with test-message delivery")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.smtp-panel/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the system settings window with the SMTP panel
    Gui,

    /// Show the stored SMTP settings
    Show,

    /// Store one setting (e.g. `set smtp.address.port 587`)
    Set {
        /// Dotted setting key
        key: String,
        /// New value
        value: String,
    },

    /// Send a test message through the configured relay
    SendTest {
        /// Recipient (defaults to the configured identity email)
        #[arg(long)]
        to: Option<String>,
    },

    /// Initialize a new config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config_path = cli.config.unwrap_or_else(Config::global_config_path);

    if let Some(Commands::Init { force }) = cli.command {
        return cli::init::init_command(&config_path, force).await;
    }

    let config = Config::load_or_init(&config_path)?;
    let runtime = tokio::runtime::Handle::current();

    match cli.command {
        Some(Commands::Show) => {
            let host = DemoHost::new(config, config_path, runtime);
            cli::show::show_command(&host).await?;
        }
        Some(Commands::Set { key, value }) => {
            let host = DemoHost::new(config, config_path, runtime);
            cli::set::set_command(&host, &key, &value).await?;
        }
        Some(Commands::SendTest { to }) => {
            let host = DemoHost::new(config, config_path, runtime);
            cli::send_test::send_test_command(&host, to).await?;
        }
        Some(Commands::Gui) | Some(Commands::Init { .. }) | None => {
            // Default: run the GUI
            smtp_panel::gui::run_gui(config, config_path, runtime)?;
        }
    }

    Ok(())
}
