mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::Path;
use tracing::{debug, warn};

/// Loads the configuration once at startup.
///
/// Reads the optional YAML file named by `CONFIG_PATH` (default `config.yaml`),
/// then applies environment overrides (`PORT`, `HOST`, `GEMINI_API_KEY`,
/// `GEMINI_MODEL`, `AUTH_TOKEN`).
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = load_file(&config_path).await?;
    apply_env(&mut config, |key| env::var(key).ok())?;

    Ok(config)
}

impl Config {
    /// Names of the secrets that are not configured.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.auth.token.is_none() {
            missing.push("AUTH_TOKEN");
        }
        if self.llm.api_key.is_empty() {
            missing.push("GEMINI_API_KEY");
        }
        missing
    }

    /// Logs a warning per missing secret. Call once the subscriber is installed.
    pub fn warn_missing_secrets(&self) {
        if self.auth.token.is_none() {
            warn!("AUTH_TOKEN is not set; every run request will be rejected as unauthorized");
        }
        if self.llm.api_key.is_empty() {
            warn!("GEMINI_API_KEY is not set; answer service calls will fail");
        }
    }
}

/// Parses the YAML file at `path`, falling back to defaults when it does not exist.
pub async fn load_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !tokio::fs::try_exists(path).await? {
        debug!("No configuration file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

pub fn apply_env<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("PORT must be a valid port number, got '{port}'")))?;
    }
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(api_key) = lookup("GEMINI_API_KEY") {
        config.llm.api_key = api_key;
    }
    if let Some(model) = lookup("GEMINI_MODEL") {
        config.llm.model = model;
    }
    if let Some(token) = lookup("AUTH_TOKEN") {
        config.auth.token = Some(token).filter(|t| !t.is_empty());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.logs.level, "info");
        assert_eq!(config.llm.model, "gemini-1.5-flash-latest");
        assert_eq!(config.llm.max_output_tokens, 2048);
        assert!(config.auth.token.is_none());
        assert!(config.server.request_timeout_secs.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        apply_env(
            &mut config,
            lookup_from(&[
                ("PORT", "9100"),
                ("GEMINI_API_KEY", "key-123"),
                ("AUTH_TOKEN", "Bearer secret"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.llm.api_key, "key-123");
        assert_eq!(config.auth.token.as_deref(), Some("Bearer secret"));
    }

    #[test]
    fn test_empty_auth_token_counts_as_unset() {
        let mut config = Config::default();
        apply_env(&mut config, lookup_from(&[("AUTH_TOKEN", "")])).unwrap();
        assert!(config.auth.token.is_none());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = Config::default();
        let err = apply_env(&mut config, lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT must be a valid port number"));
    }

    #[test]
    fn test_missing_secrets() {
        let mut config = Config::default();
        assert_eq!(config.missing_secrets(), vec!["AUTH_TOKEN", "GEMINI_API_KEY"]);

        apply_env(
            &mut config,
            lookup_from(&[("AUTH_TOKEN", "Bearer t"), ("GEMINI_API_KEY", "k")]),
        )
        .unwrap();
        assert!(config.missing_secrets().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_file(dir.path().join("absent.yaml")).await.unwrap();
        assert_eq!(config.server.port, 8000);
    }
}
