use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_MODEL_PATH: &str = "static/model/classifier.json";
const DEFAULT_REFERENCE_DATASET_PATH: &str = "static/data/nba_logreg.csv";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Inference
    pub model_path: PathBuf,
    pub reference_dataset_path: PathBuf,

    // Request logging (optional — disabled without a database)
    pub database_url: Option<String>,
    pub request_log_enabled: bool,
    pub request_log_buffer: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".into())
                .parse()?,

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| DEFAULT_MODEL_PATH.into())
                .into(),
            reference_dataset_path: env::var("REFERENCE_DATASET_PATH")
                .unwrap_or_else(|_| DEFAULT_REFERENCE_DATASET_PATH.into())
                .into(),

            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            request_log_enabled: parse_or_default(
                "REQUEST_LOG_ENABLED",
                env::var("REQUEST_LOG_ENABLED").ok(),
                true,
            ),
            request_log_buffer: parse_or_default(
                "REQUEST_LOG_BUFFER",
                env::var("REQUEST_LOG_BUFFER").ok(),
                1024,
            ),
        })
    }

    /// Returns true if request/response logging should be wired up.
    pub fn request_logging(&self) -> bool {
        self.request_log_enabled && self.database_url.is_some()
    }
}

/// Parse an optional setting, falling back to `default` with a warning
/// when the value is present but malformed.
fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
{
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(
                key,
                value = %raw,
                default = %default,
                "Invalid configuration value, using default"
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            model_path: DEFAULT_MODEL_PATH.into(),
            reference_dataset_path: DEFAULT_REFERENCE_DATASET_PATH.into(),
            database_url: None,
            request_log_enabled: true,
            request_log_buffer: 16,
        }
    }

    #[test]
    fn test_logging_requires_database() {
        assert!(!base().request_logging());

        let with_db = AppConfig {
            database_url: Some("postgres://localhost/nba".into()),
            ..base()
        };
        assert!(with_db.request_logging());

        let switched_off = AppConfig {
            request_log_enabled: false,
            ..with_db
        };
        assert!(!switched_off.request_logging());
    }

    #[test]
    fn test_invalid_setting_falls_back_to_default() {
        assert!(parse_or_default("REQUEST_LOG_ENABLED", Some("yes please".into()), true));
        assert_eq!(
            parse_or_default("REQUEST_LOG_BUFFER", Some("-3".into()), 1024usize),
            1024
        );
    }

    #[test]
    fn test_valid_setting_is_parsed() {
        assert!(!parse_or_default("REQUEST_LOG_ENABLED", Some("false".into()), true));
        assert_eq!(
            parse_or_default("REQUEST_LOG_BUFFER", Some(" 64 ".into()), 1024usize),
            64
        );
        assert_eq!(parse_or_default("REQUEST_LOG_BUFFER", None, 1024usize), 1024);
    }
}
