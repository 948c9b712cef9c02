use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::projects::links::DEFAULT_SCREENSHOT_SERVICE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub screenshot_service: String,
    pub popular_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding `session.json`; `None` resolves to `$HOME/.config/projcart`
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub default_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("PROJCART_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PROJCART_API_URL") {
            let v = v.trim().trim_end_matches('/');
            if !v.is_empty() {
                self.api.base_url = v.to_string();
            }
        }
        if let Ok(v) = env::var("PROJCART_USER_AGENT") {
            self.api.user_agent = v;
        }

        if let Ok(v) = env::var("PROJCART_SCREENSHOT_URL") {
            self.display.screenshot_service = v;
        }
        if let Ok(v) = env::var("PROJCART_POPULAR_COUNT") {
            self.display.popular_count = v.parse().unwrap_or(self.display.popular_count);
        }

        if let Ok(v) = env::var("PROJCART_CONFIG_DIR") {
            if !v.trim().is_empty() {
                self.session.config_dir = Some(PathBuf::from(v));
            }
        }

        if let Ok(v) = env::var("PROJCART_LOG") {
            self.logging.default_filter = v;
        }

        self
    }

    fn base(environment: Environment, base_url: &str, log_filter: &str) -> Self {
        Self {
            environment,
            api: ApiConfig {
                base_url: base_url.to_string(),
                user_agent: format!("projcart/{}", env!("CARGO_PKG_VERSION")),
            },
            display: DisplayConfig {
                screenshot_service: DEFAULT_SCREENSHOT_SERVICE.to_string(),
                popular_count: 4,
            },
            session: SessionConfig { config_dir: None },
            logging: LoggingConfig {
                default_filter: log_filter.to_string(),
            },
        }
    }

    pub(crate) fn development() -> Self {
        Self::base(Environment::Development, "http://localhost:5000/api", "projcart_client=debug")
    }

    fn staging() -> Self {
        Self::base(Environment::Staging, "http://localhost:5000/api", "projcart_client=info")
    }

    fn production() -> Self {
        Self::base(Environment::Production, "http://localhost:5000/api", "warn")
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.display.popular_count, 4);
        assert!(config.display.screenshot_service.starts_with("https://s.wordpress.com"));
        assert!(config.session.config_dir.is_none());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.logging.default_filter, "warn");
    }
}
