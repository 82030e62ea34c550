//! Test-message action: one asynchronous send reduced to a displayable outcome
//!
//! States: `Idle → Sending → {Sent, Failed} → Idle`.
//! A sent banner clears after [`SENT_DISPLAY`], a failure banner after
//! [`FAILED_DISPLAY`]; either clears at once on dismissal. Sending is refused
//! for a blank recipient and while a send is in flight.

mod message_id;

pub use message_id::MessageIdGenerator;

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::host::{HostError, MailEndpoint, SendRequest, SendResponse};

/// How long a success banner stays up
pub const SENT_DISPLAY: Duration = Duration::from_secs(5);

/// How long a failure banner stays up
pub const FAILED_DISPLAY: Duration = Duration::from_secs(10);

/// Fallback when the endpoint rejects without saying why
const UNKNOWN_FAILURE: &str = "unknown error";

/// Plain-text body of every test message
pub const TEST_BODY: &str =
    "This is a test message. If you are reading it, outgoing mail is configured correctly.";

/// What the panel shows for the last test send
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    None,
    Success(String),
    Failure(String),
}

/// Test-send state machine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TestSendState {
    #[default]
    Idle,
    Sending {
        recipient: String,
        message_id: String,
    },
    Sent {
        recipient: String,
        at: Instant,
    },
    Failed {
        reason: String,
        at: Instant,
    },
}

/// Controller behind the "Send test message" subform
#[derive(Debug, Clone)]
pub struct TestSendController {
    state: TestSendState,
    subject: String,
    ids: MessageIdGenerator,
}

impl TestSendController {
    pub fn new(subject: impl Into<String>, message_id_domain: impl Into<String>) -> Self {
        Self {
            state: TestSendState::Idle,
            subject: subject.into(),
            ids: MessageIdGenerator::new(message_id_domain),
        }
    }

    pub fn state(&self) -> &TestSendState {
        &self.state
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.state, TestSendState::Sending { .. })
    }

    pub fn outcome(&self) -> Outcome {
        match &self.state {
            TestSendState::Idle | TestSendState::Sending { .. } => Outcome::None,
            TestSendState::Sent { recipient, .. } => Outcome::Success(recipient.clone()),
            TestSendState::Failed { reason, .. } => Outcome::Failure(reason.clone()),
        }
    }

    /// Send enabled: a recipient is entered and nothing is in flight
    pub fn can_send(&self, recipient: &str) -> bool {
        !recipient.trim().is_empty() && !self.is_sending()
    }

    /// Start a send and return the request to issue.
    ///
    /// Returns `None`, leaving the state untouched, when sending is not
    /// allowed. A displayed outcome is superseded by the new send.
    pub fn begin_send(&mut self, recipient: &str) -> Option<SendRequest> {
        if !self.can_send(recipient) {
            return None;
        }
        let recipient = recipient.trim().to_string();
        let message_id = self.ids.next_id();

        info!("Sending test message {} to {}", message_id, recipient);
        self.state = TestSendState::Sending {
            recipient: recipient.clone(),
            message_id: message_id.clone(),
        };

        Some(SendRequest {
            recipient,
            subject: self.subject.clone(),
            message_id,
            body: Some(TEST_BODY.to_string()),
        })
    }

    /// Reduce the endpoint's answer for `message_id`.
    ///
    /// Answers for anything but the in-flight message are ignored; the return
    /// value says whether the answer was applied.
    pub fn complete(
        &mut self,
        message_id: &str,
        result: Result<SendResponse, HostError>,
        now: Instant,
    ) -> bool {
        let recipient = match &self.state {
            TestSendState::Sending {
                recipient,
                message_id: in_flight,
            } if in_flight == message_id => recipient.clone(),
            _ => {
                debug!("Ignoring stale test send completion for {}", message_id);
                return false;
            }
        };

        self.state = match result {
            Ok(response) if response.sent => {
                info!("Test message {} sent to {}", message_id, recipient);
                TestSendState::Sent { recipient, at: now }
            }
            Ok(response) => {
                let reason = failure_reason(response);
                warn!("Test message {} not sent: {}", message_id, reason);
                TestSendState::Failed { reason, at: now }
            }
            Err(e) => {
                warn!("Test message {} failed: {}", message_id, e);
                TestSendState::Failed {
                    reason: e.to_string(),
                    at: now,
                }
            }
        };
        true
    }

    /// Clear the outcome banner. No-op unless an outcome is displayed.
    pub fn dismiss(&mut self) {
        if matches!(
            self.state,
            TestSendState::Sent { .. } | TestSendState::Failed { .. }
        ) {
            self.state = TestSendState::Idle;
        }
    }

    /// Auto-dismiss an outcome whose display time has run out
    pub fn tick(&mut self, now: Instant) {
        if let Some(remaining) = self.remaining(now) {
            if remaining.is_zero() {
                self.state = TestSendState::Idle;
            }
        }
    }

    /// Time left before the displayed outcome clears itself
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let (at, display) = match &self.state {
            TestSendState::Sent { at, .. } => (*at, SENT_DISPLAY),
            TestSendState::Failed { at, .. } => (*at, FAILED_DISPLAY),
            _ => return None,
        };
        Some(display.saturating_sub(now.saturating_duration_since(at)))
    }

    /// Send to `recipient` through `endpoint` and wait for the outcome.
    ///
    /// Returns `false` when sending was not allowed and no request was made.
    pub async fn send<E>(&mut self, endpoint: &E, recipient: &str) -> bool
    where
        E: MailEndpoint + ?Sized,
    {
        let Some(request) = self.begin_send(recipient) else {
            return false;
        };
        let result = endpoint.send(&request).await;
        self.complete(&request.message_id, result, Instant::now())
    }
}

fn failure_reason(response: SendResponse) -> String {
    response
        .reason
        .filter(|r| !r.is_empty())
        .or(response.error.filter(|e| !e.is_empty()))
        .unwrap_or_else(|| UNKNOWN_FAILURE.to_string())
}
