//! smtp-panel - mail relay settings for a code-review host
//!
//! A system-settings panel that edits the host's outbound mail relay
//! configuration and sends test messages through it.
//!
//! ## Pieces
//!
//! 1. **Edit session** ([`session`]): pending edits over the panel's fields,
//!    `is_modified` / `is_saving`, batch save and reset.
//!
//! 2. **Test send** ([`test_send`]): one asynchronous send reduced to a
//!    success or failure banner that clears itself.
//!
//! 3. **Panel** ([`panel`], [`gui`]): composes both around injected host
//!    services and renders them with egui.
//!
//! The host is reached only through the traits in [`host`] and the slot
//! registry in [`extension`]; [`demo`] and [`mail`] provide the
//! implementations used by the `smtp-panel` binary.

pub mod config;
pub mod demo;
pub mod domain;
pub mod extension;
pub mod gui;
pub mod host;
pub mod mail;
pub mod panel;
pub mod session;
pub mod test_send;

pub use domain::*;
