//! Settings module for the GUI
//!
//! Renders the SMTP settings panel where administrators can:
//! - Configure the relay address (hostname, port)
//! - Configure connection security (credentials, SMTPS, STARTTLS)
//! - Set the sender address
//! - Save or reset pending edits
//! - Send a test message and see whether it was delivered

mod helpers;
mod panel;
mod sections;

pub use panel::{render_smtp_panel, smtp_panel_factory};
