//! Field specifications: which key a control binds and what type it holds

use super::key::{keys, SettingKey};
use super::value::SettingValue;

/// Declared type of a bound setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Bool,
    Integer,
    Text,
}

impl SettingKind {
    pub fn accepts(self, value: &SettingValue) -> bool {
        matches!(
            (self, value),
            (SettingKind::Bool, SettingValue::Bool(_))
                | (SettingKind::Integer, SettingValue::Integer(_))
                | (SettingKind::Text, SettingValue::Text(_))
        )
    }

    /// Zero value used when the host has no persisted value for a key.
    ///
    /// For `Integer` fields it doubles as "unset": it renders as an empty
    /// control and the relay reads a zero port as the transport default.
    pub fn empty_value(self) -> SettingValue {
        match self {
            SettingKind::Bool => SettingValue::Bool(false),
            SettingKind::Integer => SettingValue::Integer(0),
            SettingKind::Text => SettingValue::Text(String::new()),
        }
    }
}

/// A setting bound to one control on a panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: SettingKey,
    pub kind: SettingKind,
    pub label: &'static str,
}

impl FieldSpec {
    pub fn new(key: impl Into<SettingKey>, kind: SettingKind, label: &'static str) -> Self {
        Self {
            key: key.into(),
            kind,
            label,
        }
    }

    /// Turn raw text input into a value of this field's kind.
    ///
    /// Input that does not parse is kept as `Text` so the user's typing is not
    /// lost; `validate` rejects it when the session is saved. Blank input on
    /// an `Integer` field clears it.
    pub fn coerce(&self, raw: &str) -> SettingValue {
        match self.kind {
            SettingKind::Text => SettingValue::Text(raw.to_string()),
            SettingKind::Integer if raw.trim().is_empty() => self.kind.empty_value(),
            SettingKind::Integer => match raw.trim().parse::<i64>() {
                Ok(n) => SettingValue::Integer(n),
                Err(_) => SettingValue::Text(raw.to_string()),
            },
            SettingKind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => SettingValue::Bool(true),
                "false" | "no" | "off" | "0" => SettingValue::Bool(false),
                _ => SettingValue::Text(raw.to_string()),
            },
        }
    }

    /// Text shown in a control bound to this field
    pub fn display(&self, value: &SettingValue) -> String {
        match (self.kind, value) {
            (SettingKind::Integer, SettingValue::Integer(0)) => String::new(),
            _ => value.display(),
        }
    }

    pub fn validate(&self, value: &SettingValue) -> Result<(), String> {
        if !self.kind.accepts(value) {
            return Err(format!("{} must be {}", self.label, kind_name(self.kind)));
        }
        if self.key.as_str() == keys::PORT {
            if let SettingValue::Integer(port) = value {
                // 0 is the unset port
                if !(0..=65535).contains(port) {
                    return Err(format!("{} must be between 1 and 65535, or empty", self.label));
                }
            }
        }
        Ok(())
    }
}

fn kind_name(kind: SettingKind) -> &'static str {
    match kind {
        SettingKind::Bool => "true or false",
        SettingKind::Integer => "a whole number",
        SettingKind::Text => "text",
    }
}

/// Every field bound by the mail relay panel, in display order.
pub fn smtp_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(keys::HOST, SettingKind::Text, "Hostname"),
        FieldSpec::new(keys::PORT, SettingKind::Integer, "Port"),
        FieldSpec::new(keys::USERNAME, SettingKind::Text, "Username"),
        FieldSpec::new(keys::PASSWORD, SettingKind::Text, "Password"),
        FieldSpec::new(keys::USE_SMTPS, SettingKind::Bool, "Use SMTPS"),
        FieldSpec::new(keys::USE_STARTTLS, SettingKind::Bool, "Use STARTTLS"),
        FieldSpec::new(keys::SENDER, SettingKind::Text, "Sender address"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port() -> FieldSpec {
        FieldSpec::new(keys::PORT, SettingKind::Integer, "Port")
    }

    #[test]
    fn test_coerce_integer_keeps_bad_input_as_text() {
        assert_eq!(port().coerce(" 587 "), SettingValue::Integer(587));
        assert_eq!(port().coerce("58x"), SettingValue::Text("58x".to_string()));
    }

    #[test]
    fn test_blank_integer_input_is_unset() {
        assert_eq!(port().coerce(""), SettingValue::Integer(0));
        assert_eq!(port().coerce("  "), SettingValue::Integer(0));
        assert_eq!(port().display(&SettingValue::Integer(0)), "");
        assert_eq!(port().display(&SettingValue::Integer(587)), "587");
    }

    #[test]
    fn test_validate_port_range() {
        assert!(port().validate(&SettingValue::Integer(25)).is_ok());
        assert!(port().validate(&SettingValue::Integer(0)).is_ok());
        assert!(port().validate(&SettingValue::Integer(-1)).is_err());
        assert!(port().validate(&SettingValue::Integer(70000)).is_err());
        assert!(port().validate(&SettingValue::from("25")).is_err());
    }

    #[test]
    fn test_smtp_fields_unique_keys() {
        let fields = smtp_fields();
        let mut keys: Vec<_> = fields.iter().map(|f| f.key.clone()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), fields.len());
    }
}
