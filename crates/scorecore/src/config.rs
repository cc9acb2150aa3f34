use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: scorebot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "scorebot.log".to_string()));

/// Custom Bot API server URL (local Bot API server)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Google Sheets access configuration
pub mod sheets {
    use super::Duration;

    /// Public Sheets API endpoint
    pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

    /// OAuth scope requested for the service account
    pub const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

    /// Lifetime of the signed service-account assertion (in seconds)
    pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

    /// Request timeout for every call to Google (in seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default request timeout duration
    pub fn default_timeout() -> Duration {
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    }
}

/// Conversation tracking configuration
pub mod conversation {
    use super::Duration;

    /// How long a user stays in AwaitingContact after /score (in seconds)
    pub const AWAITING_CONTACT_TTL_SECS: u64 = 600; // 10 minutes

    /// Upper bound on tracked users
    pub const MAX_TRACKED_USERS: u64 = 10_000;

    /// AwaitingContact lifetime duration
    pub fn awaiting_contact_ttl() -> Duration {
        Duration::from_secs(AWAITING_CONTACT_TTL_SECS)
    }
}

/// Network configuration for the Telegram client
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Must exceed the long-polling timeout used by the dispatcher
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Configuration errors raised while reading the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required variable is unset or blank
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    /// Variable is set but cannot be parsed
    #[error("environment variable {name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Where and how to read the score sheet
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Path to the service-account JSON key file
    pub credentials_path: PathBuf,
    pub spreadsheet_id: String,
    pub sheet_name: String,
    /// Base URL of the Sheets API, overridable for tests and proxies
    pub api_base: String,
    pub timeout: Duration,
}

/// Process configuration, read once at startup
#[derive(Debug)]
pub struct Config {
    pub telegram_token: SecretString,
    pub sheets: SheetsConfig,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Required variables: `TELEGRAM_API_KEY`, `GOOGLE_SHEETS_KEY`,
    /// `SPREADSHEET_ID`, `SHEET_NAME`. They are validated here rather than on
    /// first use, so a misconfigured deployment fails at startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let telegram_token = SecretString::from(required("TELEGRAM_API_KEY")?);
        let credentials_path = PathBuf::from(required("GOOGLE_SHEETS_KEY")?);
        let spreadsheet_id = required("SPREADSHEET_ID")?;
        let sheet_name = required("SHEET_NAME")?;

        let api_base = lookup("SHEETS_API_BASE")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| sheets::DEFAULT_API_BASE.to_string());

        let timeout = match lookup("SHEETS_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0).ok_or_else(|| {
                    ConfigError::Invalid {
                        name: "SHEETS_TIMEOUT_SECS",
                        value: raw.clone(),
                    }
                })?;
                Duration::from_secs(secs)
            }
            None => sheets::default_timeout(),
        };

        Ok(Self {
            telegram_token,
            sheets: SheetsConfig {
                credentials_path,
                spreadsheet_id,
                sheet_name,
                api_base,
                timeout,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    fn required_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("TELEGRAM_API_KEY", "123:abc"),
            ("GOOGLE_SHEETS_KEY", "/etc/scorebot/key.json"),
            ("SPREADSHEET_ID", "sheet-id"),
            ("SHEET_NAME", "Scores"),
        ]
    }

    #[test]
    fn reads_required_variables_with_defaults() {
        let config = Config::from_lookup(lookup_from(&required_vars())).unwrap();

        assert_eq!(config.telegram_token.expose_secret(), "123:abc");
        assert_eq!(config.sheets.credentials_path, PathBuf::from("/etc/scorebot/key.json"));
        assert_eq!(config.sheets.spreadsheet_id, "sheet-id");
        assert_eq!(config.sheets.sheet_name, "Scores");
        assert_eq!(config.sheets.api_base, sheets::DEFAULT_API_BASE);
        assert_eq!(config.sheets.timeout, sheets::default_timeout());
    }

    #[test]
    fn reports_first_missing_variable() {
        let mut vars = required_vars();
        vars.retain(|(k, _)| *k != "SPREADSHEET_ID");

        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SPREADSHEET_ID"));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let mut vars = required_vars();
        for (k, v) in vars.iter_mut() {
            if *k == "SHEET_NAME" {
                *v = "   ";
            }
        }

        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SHEET_NAME"));
    }

    #[test]
    fn optional_overrides_are_applied() {
        let mut vars = required_vars();
        vars.push(("SHEETS_API_BASE", "http://127.0.0.1:9999/"));
        vars.push(("SHEETS_TIMEOUT_SECS", "5"));

        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.sheets.api_base, "http://127.0.0.1:9999");
        assert_eq!(config.sheets.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_zero_or_garbage_timeout() {
        for bad in ["0", "soon"] {
            let mut vars = required_vars();
            vars.push(("SHEETS_TIMEOUT_SECS", bad));

            let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    name: "SHEETS_TIMEOUT_SECS",
                    value: bad.to_string()
                }
            );
        }
    }
}
