//! Application configuration loaded from environment variables.

use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Upstream ===
    /// Base URL of the USAspending v2 API.
    #[serde(default = "default_base_url")]
    pub usaspending_base_url: String,

    /// Total request timeout for upstream calls. Unset means transport defaults.
    #[serde(default)]
    pub http_timeout_ms: Option<u64>,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    /// Expose Prometheus metrics on /metrics.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_base_url() -> String {
    "https://api.usaspending.gov/api/v2".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            usaspending_base_url: default_base_url(),
            http_timeout_ms: None,
            port: default_port(),
            rust_log: default_log_level(),
            verbose: false,
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.usaspending_base_url)
            .map_err(|e| format!("USASPENDING_BASE_URL is not a valid URL: {}", e))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("USASPENDING_BASE_URL must use http or https".to_string());
        }

        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.http_timeout_ms == Some(0) {
            return Err("HTTP_TIMEOUT_MS must be positive when set".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.usaspending_base_url, "https://api.usaspending.gov/api/v2");
        assert_eq!(config.port, 8000);
        assert!(config.http_timeout_ms.is_none());
        assert!(config.metrics_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_malformed_base_url() {
        let config = Config {
            usaspending_base_url: "not a url".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let config = Config {
            usaspending_base_url: "ftp://api.usaspending.gov/api/v2".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            http_timeout_ms: Some(0),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_from_env_style_pairs() {
        let vars = vec![
            ("USASPENDING_BASE_URL".to_string(), "http://localhost:9000/api/v2".to_string()),
            ("PORT".to_string(), "5000".to_string()),
            ("HTTP_TIMEOUT_MS".to_string(), "1500".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.usaspending_base_url, "http://localhost:9000/api/v2");
        assert_eq!(config.port, 5000);
        assert_eq!(config.http_timeout_ms, Some(1500));
        assert_eq!(config.rust_log, "info");
    }
}
