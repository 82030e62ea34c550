//! Fixed identity service

use async_trait::async_trait;

use super::{HostError, IdentityService};

/// Identity whose signed-in email comes from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    email: Option<String>,
}

impl StaticIdentity {
    pub fn new(email: Option<String>) -> Self {
        Self {
            email: email.filter(|e| !e.trim().is_empty()),
        }
    }
}

#[async_trait]
impl IdentityService for StaticIdentity {
    async fn signed_in_email(&self) -> Result<Option<String>, HostError> {
        Ok(self.email.clone())
    }
}
