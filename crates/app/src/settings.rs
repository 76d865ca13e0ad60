//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml`, overridden by `LEDGERLINE__*` environment
//! variables (e.g. `LEDGERLINE__SERVER__PORT=8080`).
use config::{Config, ConfigError, Environment, File};
use notifier::{MailerConfig, TwilioConfig};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 3000,
            database: Database::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Notifications {
    pub email: Option<MailerConfig>,
    pub sms: Option<TwilioConfig>,
    /// Limit for one provider call, in seconds.
    pub timeout_secs: u64,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            email: None,
            sms: None,
            timeout_secs: notifier::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub notifications: Notifications,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("LEDGERLINE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_uses_defaults() {
        let settings = parse("");
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 3000);
        assert!(matches!(settings.server.database, Database::Memory));
        assert!(settings.notifications.email.is_none());
        assert!(settings.notifications.sms.is_none());
        assert_eq!(settings.notifications.timeout_secs, 10);
    }

    #[test]
    fn full_file() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 8080
            database = { sqlite = "ledger.db" }

            [notifications]
            timeout_secs = 3

            [notifications.email]
            endpoint = "https://mail.example.com/send"
            api_key = "key"
            from = "alerts@example.com"

            [notifications.sms]
            account_sid = "AC1"
            auth_token = "token"
            from_number = "+15550000"
            "#,
        );
        assert_eq!(settings.server.bind.as_deref(), Some("0.0.0.0"));
        assert!(matches!(settings.server.database, Database::Sqlite(ref path) if path == "ledger.db"));
        assert_eq!(settings.notifications.timeout_secs, 3);
        assert_eq!(
            settings.notifications.sms.unwrap().api_base,
            "https://api.twilio.com"
        );
    }
}
