//! CLI command implementations

pub mod init;
pub mod set;
pub mod show;
