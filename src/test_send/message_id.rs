//! Unique message ids for test sends

/// Generates `test-message-<millis>@<domain>` ids.
///
/// The millisecond component never repeats or goes backwards for one
/// generator, even if the wall clock stalls or is stepped back.
#[derive(Debug, Clone)]
pub struct MessageIdGenerator {
    domain: String,
    last_millis: i64,
}

impl MessageIdGenerator {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            last_millis: i64::MIN,
        }
    }

    /// Next id from the current wall clock
    pub fn next_id(&mut self) -> String {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    /// Next id for a given clock reading
    pub fn next_at(&mut self, millis: i64) -> String {
        let millis = if millis > self.last_millis {
            millis
        } else {
            self.last_millis.saturating_add(1)
        };
        self.last_millis = millis;
        format!("test-message-{}@{}", millis, self.domain)
    }
}
