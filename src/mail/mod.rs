//! Demo host mail endpoint
//!
//! Implements the host's `send-email` endpoint on top of
//! [lettre](https://lettre.rs). The relay is configured entirely from the
//! host settings the panel edits:
//!
//! | Setting | Meaning |
//! |---------|---------|
//! | `smtp.address.host` | Relay hostname (required) |
//! | `smtp.address.port` | Port (transport default when unset) |
//! | `smtp.credentials.username` / `.password` | Optional login |
//! | `smtp.use_smtps` | Implicit TLS; wins when both toggles are set |
//! | `smtp.use_starttls` | STARTTLS upgrade |
//! | `smtp.sender` | From address; falls back to `system.email`, then `critic@<hostname>` |

mod endpoint;
mod relay;

pub use endpoint::{build_message, SmtpEndpoint};
pub use relay::{resolve_sender, RelayConfig, Security};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}
