//! SMTP settings panel: composition of the edit session and the test action
//!
//! The panel owns one [`EditSession`] over the `smtp.*` fields, one
//! [`TestSendController`] and the recipient text. Host calls (initial load,
//! reload on external change, save, test send, identity lookup) run on the
//! tokio runtime; their results come back through a channel that
//! [`SmtpPanel::poll`] drains on the UI loop, so all state changes happen on
//! the UI thread.
//!
//! Detaching the panel aborts whatever is still in flight, so a completion
//! can never land on a panel the host has already torn down.

mod services;

pub use services::{PanelOptions, PanelServices};

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::domain::{keys, smtp_fields, SettingKey, SettingValue};
use crate::host::{HostError, SaveBatch, SendResponse};
use crate::session::EditSession;
use crate::test_send::TestSendController;

/// Section id and title of the panel in the system settings view
pub const SECTION_ID: &str = "email-delivery";
pub const SECTION_TITLE: &str = "SMTP server configuration";

/// Status line below the Save/Reset pair: message and whether it is an error
pub type Notice = (String, bool);

enum Completion {
    Loaded {
        generation: u64,
        result: Result<BTreeMap<SettingKey, SettingValue>, HostError>,
    },
    Identity(Result<Option<String>, HostError>),
    Saved {
        batch: SaveBatch,
        result: Result<(), HostError>,
    },
    TestSent {
        message_id: String,
        result: Result<SendResponse, HostError>,
    },
}

/// Mail relay settings panel
pub struct SmtpPanel {
    services: PanelServices,
    session: EditSession,
    test: TestSendController,
    recipient: String,
    recipient_edited: bool,
    notice: Option<Notice>,
    loaded: bool,
    detached: bool,
    changes: watch::Receiver<u64>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    tasks: Vec<AbortHandle>,
    in_flight: usize,
    // Only the load tagged with the current generation is applied
    load_generation: u64,
}

impl SmtpPanel {
    /// Create the panel and start loading settings and the default recipient
    pub fn new(services: PanelServices) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut changes = services.settings.subscribe();
        let _ = changes.borrow_and_update();
        let test = TestSendController::new(
            services.options.test_subject.clone(),
            services.options.message_id_domain.clone(),
        );

        let mut panel = Self {
            services,
            session: EditSession::new(smtp_fields()),
            test,
            recipient: String::new(),
            recipient_edited: false,
            notice: None,
            loaded: false,
            detached: false,
            changes,
            tx,
            rx,
            tasks: Vec::new(),
            in_flight: 0,
            load_generation: 0,
        };

        panel.spawn_load();
        let identity = panel.services.identity.clone();
        panel.spawn(async move { Completion::Identity(identity.signed_in_email().await) });
        panel
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn test(&self) -> &TestSendController {
        &self.test
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Replace the recipient text (local input, never persisted)
    pub fn set_recipient(&mut self, recipient: impl Into<String>) {
        self.recipient = recipient.into();
        self.recipient_edited = true;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.session.clear_error();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Host calls spawned and not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn can_send(&self) -> bool {
        !self.detached && self.test.can_send(&self.recipient)
    }

    /// Save button handler
    pub fn request_save(&mut self) {
        if self.detached {
            return;
        }
        match self.session.begin_save() {
            Ok(Some(batch)) => {
                self.notice = None;
                let store = self.services.settings.clone();
                self.spawn(async move {
                    let result = store.save(&batch).await;
                    Completion::Saved { batch, result }
                });
            }
            Ok(None) => {}
            Err(e) => {
                self.notice = Some((e.to_string(), true));
            }
        }
    }

    /// Reset button handler
    pub fn reset(&mut self) {
        self.session.reset();
        self.notice = None;
    }

    /// Send button handler
    pub fn request_send(&mut self) {
        if self.detached {
            return;
        }
        let Some(request) = self.test.begin_send(&self.recipient) else {
            return;
        };
        let mail = self.services.mail.clone();
        self.spawn(async move {
            let result = mail.send(&request).await;
            Completion::TestSent {
                message_id: request.message_id,
                result,
            }
        });
    }

    pub fn dismiss_outcome(&mut self) {
        self.test.dismiss();
    }

    /// Apply finished host calls, external setting changes and banner timers
    pub fn poll(&mut self, now: Instant) {
        if self.detached {
            return;
        }
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion, now);
        }
        if self.changes.has_changed().unwrap_or(false) {
            let _ = self.changes.borrow_and_update();
            debug!("Settings changed on host, reloading");
            self.spawn_load();
        }
        self.test.tick(now);
    }

    /// Wait until every spawned host call has been applied
    pub async fn run_until_idle(&mut self) {
        while self.in_flight > 0 && !self.detached {
            let Some(completion) = self.rx.recv().await else {
                break;
            };
            self.apply(completion, Instant::now());
        }
    }

    /// Abort in-flight work; the panel ignores everything afterwards
    pub fn on_detach(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        let pending = self.tasks.iter().filter(|t| !t.is_finished()).count();
        for task in self.tasks.drain(..) {
            task.abort();
        }
        if pending > 0 {
            info!("Detached with {} host call(s) in flight, aborted", pending);
        }
        self.in_flight = 0;
    }

    fn spawn_load(&mut self) {
        self.load_generation += 1;
        let generation = self.load_generation;
        let store = self.services.settings.clone();
        self.spawn(async move {
            let result = store.load_by_prefix(keys::SMTP_PREFIX).await;
            Completion::Loaded { generation, result }
        });
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.tasks.retain(|t| !t.is_finished());
        let tx = self.tx.clone();
        let handle = self.services.runtime.spawn(async move {
            // Receiver gone means the panel was dropped
            let _ = tx.send(task.await);
        });
        self.tasks.push(handle.abort_handle());
        self.in_flight += 1;
    }

    fn apply(&mut self, completion: Completion, now: Instant) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Loaded { generation, .. } if generation != self.load_generation => {
                debug!("Dropping outdated settings load");
            }
            Completion::Loaded { result: Ok(values), .. } => {
                self.session.refresh(values);
                self.loaded = true;
            }
            Completion::Loaded { result: Err(e), .. } => {
                warn!("Failed to load SMTP settings: {}", e);
                self.notice = Some((format!("Failed to load settings: {}", e), true));
            }
            Completion::Identity(Ok(email)) => {
                if !self.recipient_edited {
                    if let Some(email) = email {
                        self.recipient = email;
                    }
                }
            }
            Completion::Identity(Err(e)) => {
                debug!("No default recipient: {}", e);
            }
            Completion::Saved { batch, result } => match self.session.finish_save(&batch, result) {
                Ok(()) => {
                    // Loads started before the save read the old values
                    self.load_generation += 1;
                    self.notice = Some(("Settings saved!".to_string(), false));
                }
                Err(e) => self.notice = Some((e.to_string(), true)),
            },
            Completion::TestSent { message_id, result } => {
                self.test.complete(&message_id, result, now);
            }
        }
    }
}

impl Drop for SmtpPanel {
    fn drop(&mut self) {
        self.on_detach();
    }
}
