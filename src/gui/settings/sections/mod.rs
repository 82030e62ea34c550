//! Settings section render functions
//!
//! Each function renders one group of the SMTP panel.

mod actions;
mod address;
mod security;
mod sender;
mod test_message;

pub use actions::render_save_or_reset;
pub use address::render_address_group;
pub use security::render_security_group;
pub use sender::render_sender_group;
pub use test_message::render_test_message_group;
