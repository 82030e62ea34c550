//! Relay connection parameters read from host settings

use std::collections::BTreeMap;

use crate::domain::{keys, SettingKey, SettingValue};

/// Transport security chosen for the relay connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Security {
    /// Implicit TLS from the first byte (SMTPS)
    Smtps,
    /// Plain connection upgraded with STARTTLS
    StartTls,
    None,
}

/// Connection parameters of the outbound relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: Option<u16>,
    pub credentials: Option<(String, String)>,
    pub security: Security,
    pub sender: Option<String>,
}

impl RelayConfig {
    /// Build from `smtp.*` settings. Fails when no host is configured or the
    /// stored port is out of range.
    pub fn from_settings(settings: &BTreeMap<SettingKey, SettingValue>) -> Result<Self, String> {
        let text = |key: &str| {
            settings
                .get(&SettingKey::new(key))
                .and_then(SettingValue::as_text)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let flag = |key: &str| {
            settings
                .get(&SettingKey::new(key))
                .and_then(SettingValue::as_bool)
                .unwrap_or(false)
        };

        let host = text(keys::HOST).ok_or_else(|| "SMTP server not configured".to_string())?;

        let port = match settings.get(&SettingKey::new(keys::PORT)) {
            None => None,
            Some(SettingValue::Integer(0)) => None,
            Some(SettingValue::Integer(n)) => Some(
                u16::try_from(*n).map_err(|_| format!("invalid SMTP port: {}", n))?,
            ),
            Some(other) => return Err(format!("invalid SMTP port: {}", other)),
        };

        let credentials = text(keys::USERNAME).map(|user| {
            let password = settings
                .get(&SettingKey::new(keys::PASSWORD))
                .and_then(SettingValue::as_text)
                .unwrap_or_default()
                .to_string();
            (user, password)
        });

        // Both toggles may be set; implicit TLS takes precedence.
        let security = if flag(keys::USE_SMTPS) {
            Security::Smtps
        } else if flag(keys::USE_STARTTLS) {
            Security::StartTls
        } else {
            Security::None
        };

        Ok(Self {
            host,
            port,
            credentials,
            security,
            sender: text(keys::SENDER),
        })
    }
}

/// Sender address: configured sender, else the system email, else
/// `critic@<hostname>`
pub fn resolve_sender(
    configured: Option<&str>,
    system_email: Option<&str>,
    hostname: &str,
) -> String {
    configured
        .filter(|s| !s.trim().is_empty())
        .or(system_email.filter(|s| !s.trim().is_empty()))
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| format!("critic@{}", hostname))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(values: &[(&str, SettingValue)]) -> BTreeMap<SettingKey, SettingValue> {
        values
            .iter()
            .map(|(k, v)| (SettingKey::new(*k), v.clone()))
            .collect()
    }

    #[test]
    fn test_requires_host() {
        let err = RelayConfig::from_settings(&settings(&[(keys::HOST, SettingValue::from("  "))]))
            .unwrap_err();
        assert_eq!(err, "SMTP server not configured");
    }

    #[test]
    fn test_smtps_wins_over_starttls() {
        let relay = RelayConfig::from_settings(&settings(&[
            (keys::HOST, SettingValue::from("mail.example.com")),
            (keys::PORT, SettingValue::Integer(465)),
            (keys::USE_SMTPS, SettingValue::Bool(true)),
            (keys::USE_STARTTLS, SettingValue::Bool(true)),
        ]))
        .unwrap();
        assert_eq!(relay.security, Security::Smtps);
        assert_eq!(relay.port, Some(465));
        assert!(relay.credentials.is_none());
    }

    #[test]
    fn test_credentials_need_username() {
        let relay = RelayConfig::from_settings(&settings(&[
            (keys::HOST, SettingValue::from("mail.example.com")),
            (keys::USERNAME, SettingValue::from("relay")),
            (keys::PASSWORD, SettingValue::from("secret")),
        ]))
        .unwrap();
        assert_eq!(
            relay.credentials,
            Some(("relay".to_string(), "secret".to_string()))
        );
        assert_eq!(relay.security, Security::None);
    }

    #[test]
    fn test_port_out_of_range() {
        let err = RelayConfig::from_settings(&settings(&[
            (keys::HOST, SettingValue::from("mail.example.com")),
            (keys::PORT, SettingValue::Integer(70000)),
        ]))
        .unwrap_err();
        assert!(err.contains("70000"));
    }

    #[test]
    fn test_resolve_sender_fallbacks() {
        assert_eq!(
            resolve_sender(Some("relay@example.com"), Some("sys@example.com"), "review"),
            "relay@example.com"
        );
        assert_eq!(
            resolve_sender(Some(""), Some("sys@example.com"), "review"),
            "sys@example.com"
        );
        assert_eq!(resolve_sender(None, None, "review.example.com"), "critic@review.example.com");
    }
}
