//! `send-email` endpoint backed by lettre

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use super::relay::{resolve_sender, RelayConfig, Security};
use super::MailError;
use crate::domain::{keys, SettingKey};
use crate::host::{HostError, MailEndpoint, SendRequest, SendResponse, SettingsStore};

const DEFAULT_BODY: &str = "This is a test message.";

/// Mail endpoint that relays through the SMTP server configured in the
/// host's `smtp.*` settings.
///
/// Settings are read on every request so a freshly saved configuration is
/// used by the next test send. Delivery problems never surface as `Err`;
/// they come back as `sent: false` with a reason.
pub struct SmtpEndpoint {
    settings: Arc<dyn SettingsStore>,
    hostname: String,
    timeout: Duration,
}

impl SmtpEndpoint {
    pub fn new(settings: Arc<dyn SettingsStore>, hostname: impl Into<String>, timeout: Duration) -> Self {
        Self {
            settings,
            hostname: hostname.into(),
            timeout,
        }
    }

    async fn relay(&self) -> Result<(RelayConfig, String), HostError> {
        let smtp = self.settings.load_by_prefix(keys::SMTP_PREFIX).await?;
        let relay = RelayConfig::from_settings(&smtp).map_err(HostError::Rejected)?;

        let system_email = self
            .settings
            .get(&SettingKey::new(keys::SYSTEM_EMAIL))
            .await?
            .and_then(|v| v.as_text().map(str::to_string));
        let hostname = self
            .settings
            .get(&SettingKey::new(keys::SYSTEM_HOSTNAME))
            .await?
            .and_then(|v| v.as_text().map(str::to_string))
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| self.hostname.clone());

        let sender = resolve_sender(relay.sender.as_deref(), system_email.as_deref(), &hostname);
        Ok((relay, sender))
    }

    async fn deliver(&self, relay: &RelayConfig, message: Message) -> SendResponse {
        let transport = match build_transport(relay, self.timeout) {
            Ok(t) => t,
            Err(e) => {
                error!("- failed to set up transport: {}", e);
                return SendResponse::failed("error").with_error(e.to_string());
            }
        };

        match tokio::time::timeout(self.timeout, transport.send(message)).await {
            Ok(Ok(_)) => {
                info!("- sent");
                SendResponse::sent()
            }
            Ok(Err(e)) if recipients_refused(&e) => {
                error!("- recipients refused: {}", e);
                SendResponse::failed("recipients refused").with_error(e.to_string())
            }
            Ok(Err(e)) => {
                error!("- failed to send message: {}", e);
                SendResponse::failed("error").with_error(e.to_string())
            }
            Err(elapsed) => {
                error!("- timed out after {:?}", self.timeout);
                SendResponse::failed("Timeout waiting for delivery notification")
                    .with_error(elapsed.to_string())
            }
        }
    }
}

#[async_trait]
impl MailEndpoint for SmtpEndpoint {
    async fn send(&self, request: &SendRequest) -> Result<SendResponse, HostError> {
        if request.recipient.trim().is_empty() {
            return Err(HostError::InvalidPayload(
                "recipient must be a non-empty string".to_string(),
            ));
        }
        if request.subject.trim().is_empty() {
            return Err(HostError::InvalidPayload(
                "subject must be a non-empty string".to_string(),
            ));
        }

        let (relay, sender) = match self.relay().await {
            Ok(r) => r,
            Err(HostError::Rejected(reason)) => return Ok(SendResponse::failed(reason)),
            Err(e) => return Err(e),
        };

        info!("Subject: {}", request.subject);
        info!("To: {}", request.recipient);

        let message = match build_message(&sender, request) {
            Ok(m) => m,
            Err(e) => {
                error!("- {}", e);
                let reason = match &e {
                    MailError::InvalidAddress(_) => "invalid address",
                    _ => "error",
                };
                return Ok(SendResponse::failed(reason).with_error(e.to_string()));
            }
        };

        let mut response = self.deliver(&relay, message).await;
        if response.reason.as_deref() == Some("recipients refused") {
            response.recipients = vec![request.recipient.clone()];
        }
        Ok(response)
    }
}

/// Build the outgoing message for a test send
pub fn build_message(sender: &str, request: &SendRequest) -> Result<Message, MailError> {
    let from: Mailbox = sender
        .parse()
        .map_err(|_| MailError::InvalidAddress(sender.to_string()))?;
    let to: Mailbox = request
        .recipient
        .trim()
        .parse()
        .map_err(|_| MailError::InvalidAddress(request.recipient.clone()))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(request.subject.clone())
        .message_id(Some(format!("<{}>", request.message_id)))
        .header(ContentType::TEXT_PLAIN)
        .body(
            request
                .body
                .clone()
                .unwrap_or_else(|| DEFAULT_BODY.to_string()),
        )
        .map_err(|e| MailError::Build(e.to_string()))
}

fn build_transport(
    relay: &RelayConfig,
    timeout: Duration,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
    let mut builder = match relay.security {
        Security::Smtps => AsyncSmtpTransport::<Tokio1Executor>::relay(&relay.host)
            .map_err(|e| MailError::Smtp(e.to_string()))?,
        Security::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&relay.host)
            .map_err(|e| MailError::Smtp(e.to_string()))?,
        Security::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&relay.host),
    };

    if let Some(port) = relay.port {
        builder = builder.port(port);
    }
    if let Some((user, password)) = &relay.credentials {
        builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
    }

    Ok(builder.timeout(Some(timeout)).build())
}

/// Permanent 55x replies to the envelope mean the relay refused the recipient
fn recipients_refused(e: &lettre::transport::smtp::Error) -> bool {
    e.is_permanent()
        && e
            .status()
            .map(|code| code.to_string().starts_with("55"))
            .unwrap_or(false)
}
