//! Field bindings: the `{ value, on_change }` view a control works with

use super::EditSession;
use crate::domain::{FieldSpec, SettingValue};

/// View of one bound setting inside an [`EditSession`].
///
/// Holds the session mutably for as long as the control needs it, which in
/// an immediate-mode UI is the duration of one widget call.
pub struct FieldBinding<'a> {
    session: &'a mut EditSession,
    field: FieldSpec,
}

impl<'a> FieldBinding<'a> {
    pub(super) fn new(session: &'a mut EditSession, field: FieldSpec) -> Self {
        Self { session, field }
    }

    pub fn field(&self) -> &FieldSpec {
        &self.field
    }

    /// Pending edit if present, else the persisted value
    pub fn value(&self) -> SettingValue {
        self.session
            .value(&self.field.key)
            .unwrap_or_else(|| self.field.kind.empty_value())
    }

    /// Value rendered into a text control
    pub fn text(&self) -> String {
        self.field.display(&self.value())
    }

    /// Value rendered into a checkbox; non-boolean values read as unchecked
    pub fn checked(&self) -> bool {
        self.value().as_bool().unwrap_or(false)
    }

    /// Record `value` as the pending edit for this key
    pub fn on_change(&mut self, value: impl Into<SettingValue>) {
        self.session.record(&self.field.key, value.into());
    }

    /// Record raw text input, coerced to the field's kind
    pub fn on_change_text(&mut self, raw: &str) {
        let value = self.field.coerce(raw);
        self.session.record(&self.field.key, value);
    }

    pub fn is_modified(&self) -> bool {
        self.session.pending_value(&self.field.key).is_some()
    }
}
