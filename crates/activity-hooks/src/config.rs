use crate::auth::SigningIdentity;
use crate::client::DEFAULT_BASE_URL;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ACTIVITY";

/// Manager configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ManagerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub environment: String,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    pub credentials: SigningIdentity,
}

impl ManagerConfig {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_env(ENV_PREFIX)
    }

    /// Load configuration from environment with custom prefix
    pub fn load_from_env(prefix: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .add_source(Self::environment(prefix));

        builder.build()?.try_deserialize()
    }

    /// Load configuration from file with environment overrides
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .add_source(File::with_name(path))
            .add_source(Self::environment(ENV_PREFIX));

        builder.build()?.try_deserialize()
    }

    /// Values stay strings; `timeout_seconds` is converted on deserialize,
    /// so digit-only names and keys keep their leading zeros.
    fn environment(prefix: &str) -> Environment {
        Environment::with_prefix(prefix).separator("__")
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manager.toml");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
environment = "dev"
timeout_seconds = 15

[credentials]
consumer_key = "ck"
consumer_secret = "cs"
access_token = "at"
access_token_secret = "ats"
"#
        )
        .unwrap();

        let config = ManagerConfig::load_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.environment, "dev");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, Some(15));
        assert_eq!(config.credentials.consumer_key, "ck");
        assert_eq!(config.credentials.consumer_secret.expose_secret(), "cs");
        assert_eq!(config.credentials.access_token_secret.expose_secret(), "ats");
    }

    #[test]
    fn test_load_from_env_keeps_numeric_looking_strings() {
        let prefix = "ACTIVITY_NUMERIC_TEST";
        let vars = [
            ("ACTIVITY_NUMERIC_TEST__ENVIRONMENT", "007"),
            ("ACTIVITY_NUMERIC_TEST__TIMEOUT_SECONDS", "15"),
            ("ACTIVITY_NUMERIC_TEST__CREDENTIALS__CONSUMER_KEY", "000123"),
            ("ACTIVITY_NUMERIC_TEST__CREDENTIALS__CONSUMER_SECRET", "1e3"),
            ("ACTIVITY_NUMERIC_TEST__CREDENTIALS__ACCESS_TOKEN", "42-0042"),
            ("ACTIVITY_NUMERIC_TEST__CREDENTIALS__ACCESS_TOKEN_SECRET", "0.50"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let config = ManagerConfig::load_from_env(prefix);

        for (key, _) in vars {
            std::env::remove_var(key);
        }

        let config = config.unwrap();
        assert_eq!(config.environment, "007");
        assert_eq!(config.timeout_seconds, Some(15));
        assert_eq!(config.credentials.consumer_key, "000123");
        assert_eq!(config.credentials.consumer_secret.expose_secret(), "1e3");
        assert_eq!(config.credentials.access_token, "42-0042");
        assert_eq!(config.credentials.access_token_secret.expose_secret(), "0.50");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        assert!(ManagerConfig::load_from_file("/nonexistent/activity-hooks/manager").is_err());
    }
}
