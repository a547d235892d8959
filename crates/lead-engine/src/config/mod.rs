mod icp;

pub use icp::{
    BonusRule, ColumnMapping, ConditionalSignal, EnrichmentConfig, FlagRule, IcpConfig,
    IcpConfigError, IndustryTierRule, IndustryTiers, InputConfig, KeywordCategory,
    KeywordSignals, OutputConfig, SignalCondition, SizeBracket, SizeScoring, TierThreshold,
};

use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Process-level settings read from the environment (and `.env`).
///
/// The scoring rules themselves live in the ICP document, see [`IcpConfig`].
/// Settings for the Pass 2 services are read separately through
/// [`CollaboratorConfig::from_env`], so scoring never depends on them.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Endpoints and credentials for the Pass 2 search and extraction services.
#[derive(Clone)]
pub struct CollaboratorConfig {
    pub anthropic_api_key: Option<String>,
    pub anthropic_url: String,
    pub search_url: String,
    pub http_timeout: Duration,
}

impl CollaboratorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let raw_timeout =
            env::var("LEAD_ENGINE_HTTP_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string());
        let timeout_secs = raw_timeout
            .trim()
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidTimeout {
                value: raw_timeout.clone(),
                source,
            })?;

        let anthropic_api_key = env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let search_url =
            env::var("LEAD_ENGINE_SEARCH_URL").unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string());

        Ok(Self {
            anthropic_api_key,
            anthropic_url: DEFAULT_ANTHROPIC_URL.to_string(),
            search_url,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn anthropic_api_key(&self) -> Result<&str, ConfigError> {
        self.anthropic_api_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey("ANTHROPIC_API_KEY"))
    }
}

impl fmt::Debug for CollaboratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollaboratorConfig")
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("anthropic_url", &self.anthropic_url)
            .field("search_url", &self.search_url)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTimeout {
        value: String,
        source: std::num::ParseIntError,
    },
    MissingApiKey(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeout { value, .. } => write!(
                f,
                "LEAD_ENGINE_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{value}'"
            ),
            ConfigError::MissingApiKey(var) => {
                write!(f, "{var} must be set to run enrichment")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidTimeout { source, .. } => Some(source),
            ConfigError::MissingApiKey(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("ANTHROPIC_API_KEY");
        env::remove_var("LEAD_ENGINE_HTTP_TIMEOUT_SECS");
        env::remove_var("LEAD_ENGINE_SEARCH_URL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");

        let collaborators = CollaboratorConfig::from_env().expect("collaborators load");
        assert_eq!(collaborators.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(collaborators.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEAD_ENGINE_HTTP_TIMEOUT_SECS", "soon");
        let error = CollaboratorConfig::from_env().expect_err("timeout must be numeric");
        env::remove_var("LEAD_ENGINE_HTTP_TIMEOUT_SECS");

        match error {
            ConfigError::InvalidTimeout { value, .. } => assert_eq!(value, "soon"),
            other => panic!("expected timeout error, got {other:?}"),
        }
    }

    #[test]
    fn app_config_ignores_collaborator_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEAD_ENGINE_HTTP_TIMEOUT_SECS", "soon");
        let result = AppConfig::load();
        env::remove_var("LEAD_ENGINE_HTTP_TIMEOUT_SECS");

        assert!(result.is_ok());
    }

    #[test]
    fn api_key_is_required_only_when_requested() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        let config = AppConfig::load().expect("config loads without key");
        let collaborators = CollaboratorConfig::from_env().expect("collaborators load without key");
        env::remove_var("APP_ENV");

        assert_eq!(config.environment, AppEnvironment::Test);
        assert!(matches!(
            collaborators.anthropic_api_key(),
            Err(ConfigError::MissingApiKey("ANTHROPIC_API_KEY"))
        ));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let collaborators = CollaboratorConfig {
            anthropic_api_key: Some("sk-secret".to_string()),
            anthropic_url: DEFAULT_ANTHROPIC_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            http_timeout: Duration::from_secs(5),
        };

        let rendered = format!("{collaborators:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
