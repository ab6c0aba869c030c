//! Configuration loader for Coffee Chats.
//!
//! Resolution order, later wins:
//! 1. built-in defaults (local backend, Basic Auth on, empty credentials)
//! 2. `config.toml` (explicit `--config` path, else the config directory)
//! 3. environment variables
//!
//! The result is a [`ClientSettings`] ready for [`HttpChatRepository`].
//!
//! [`HttpChatRepository`]: crate::http::HttpChatRepository

use std::path::{Path, PathBuf};
use std::time::Duration;

use coffeechat_types::config::FileConfig;
use coffeechat_types::error::ConfigError;

use crate::http::{BasicCredentials, ClientSettings};

/// Backend base URL.
pub const ENV_API_URL: &str = "COFFEECHAT_API_URL";
/// Basic Auth username (empty when unset).
pub const ENV_USERNAME: &str = "BASICAUTH_USERNAME";
/// Basic Auth password (empty when unset).
pub const ENV_PASSWORD: &str = "BASICAUTH_PASSWORD";
/// `0`, `false`, `no` or `off` turns the credential header off.
pub const ENV_BASIC_AUTH: &str = "COFFEECHAT_BASIC_AUTH";
/// Overrides the directory holding `config.toml`.
pub const ENV_CONFIG_DIR: &str = "COFFEECHAT_CONFIG_DIR";

/// Resolve the configuration directory.
///
/// Priority: `COFFEECHAT_CONFIG_DIR`, then `~/.coffeechat`, then `./.coffeechat`.
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".coffeechat");
    }

    PathBuf::from(".coffeechat")
}

/// Read `config.toml`.
///
/// - An explicit path that cannot be read is an error.
/// - A missing default file yields [`FileConfig::default()`].
/// - A file that fails to parse logs a warning and yields the default.
pub async fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => resolve_config_dir().join("config.toml"),
    };

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return Ok(FileConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    match toml::from_str::<FileConfig>(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            Ok(FileConfig::default())
        }
    }
}

/// Overlay environment variables onto a file config.
///
/// `lookup` is `std::env::var` in production and a map in tests.
pub fn apply_env<F>(config: &mut FileConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url;
    }
    if let Some(username) = lookup(ENV_USERNAME) {
        config.auth.username = username;
    }
    if let Some(password) = lookup(ENV_PASSWORD) {
        config.auth.password = password;
    }
    if let Some(flag) = lookup(ENV_BASIC_AUTH) {
        config.auth.basic = !matches!(
            flag.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        );
    }
}

/// Turn a resolved file config into client settings.
///
/// Empty credentials are kept as-is when Basic Auth is on.
pub fn into_client_settings(config: FileConfig) -> Result<ClientSettings, ConfigError> {
    let base_url = config.api.base_url.trim().to_string();
    match reqwest::Url::parse(&base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => return Err(ConfigError::InvalidBaseUrl(base_url)),
    }

    let credentials = config
        .auth
        .basic
        .then(|| BasicCredentials::new(config.auth.username, config.auth.password));

    Ok(ClientSettings {
        base_url,
        credentials,
        timeout: config.api.timeout_secs.map(Duration::from_secs),
    })
}

/// Full resolution: defaults, file, process environment.
pub async fn load_client_settings(explicit: Option<&Path>) -> Result<ClientSettings, ConfigError> {
    let mut config = load_file_config(explicit).await?;
    apply_env(&mut config, |key| std::env::var(key).ok());

    let settings = into_client_settings(config)?;
    tracing::debug!(
        base_url = %settings.base_url,
        credentialed = settings.credentials.is_some(),
        "client settings resolved"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_file_config(Some(&tmp.path().join("nope.toml"))).await;
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[tokio::test]
    async fn valid_toml_is_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(
            &path,
            r#"
[api]
base_url = "https://chats.example.com/"
timeout_secs = 30

[auth]
username = "alice"
password = "s3cret"
"#,
        )
        .await
        .unwrap();

        let config = load_file_config(Some(&path)).await.unwrap();
        assert_eq!(config.api.base_url, "https://chats.example.com/");
        assert_eq!(config.api.timeout_secs, Some(30));
        assert_eq!(config.auth.username, "alice");
    }

    #[tokio::test]
    async fn invalid_toml_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_file_config(Some(&path)).await.unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(config.auth.basic);
    }

    #[test]
    fn defaults_send_empty_basic_credentials() {
        let mut config = FileConfig::default();
        apply_env(&mut config, env(&[]));
        let settings = into_client_settings(config).unwrap();

        assert_eq!(settings.base_url, "http://localhost:8000");
        let creds = settings.credentials.expect("credentialed by default");
        assert_eq!(creds.username, "");
        assert_eq!(creds.password.expose_secret(), "");
        assert!(settings.timeout.is_none());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = FileConfig::default();
        config.auth.username = "from-file".to_string();
        apply_env(
            &mut config,
            env(&[
                (ENV_API_URL, "https://api.example.com"),
                (ENV_USERNAME, "bob"),
                (ENV_PASSWORD, "pw"),
            ]),
        );
        let settings = into_client_settings(config).unwrap();

        assert_eq!(settings.base_url, "https://api.example.com");
        let creds = settings.credentials.unwrap();
        assert_eq!(creds.username, "bob");
        assert_eq!(creds.password.expose_secret(), "pw");
    }

    #[test]
    fn blank_api_url_keeps_previous_value() {
        let mut config = FileConfig::default();
        apply_env(&mut config, env(&[(ENV_API_URL, "  ")]));
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn basic_auth_can_be_switched_off() {
        for flag in ["0", "false", "No", "OFF"] {
            let mut config = FileConfig::default();
            apply_env(&mut config, env(&[(ENV_BASIC_AUTH, flag)]));
            let settings = into_client_settings(config).unwrap();
            assert!(settings.credentials.is_none(), "flag {flag}");
        }

        let mut config = FileConfig::default();
        config.auth.basic = false;
        apply_env(&mut config, env(&[(ENV_BASIC_AUTH, "1")]));
        assert!(into_client_settings(config).unwrap().credentials.is_some());
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let mut config = FileConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            into_client_settings(config),
            Err(ConfigError::InvalidBaseUrl(_))
        ));

        let mut config = FileConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(into_client_settings(config).is_err());
    }
}
