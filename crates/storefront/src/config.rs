//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GLOWVITA_DATA_DIR` - Directory for the local cart slot (default: `.glowvita`)
//! - `GLOWVITA_BACKEND_URL` - Base URL of the hosted backend (e.g. `https://xyz.supabase.co`)
//! - `GLOWVITA_BACKEND_ANON_KEY` - Public (anon) API key for the hosted backend
//!
//! The two backend variables must be set together. Commands that submit
//! orders call [`StorefrontConfig::require_backend`].

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".glowvita";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the file-backed storage slots
    pub data_dir: PathBuf,
    /// Hosted backend, if configured
    pub backend: Option<BackendConfig>,
}

/// Hosted backend configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL, always ending in `/`
    pub url: Url,
    /// Anon API key sent as `apikey` and bearer token
    pub anon_key: SecretString,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url.as_str())
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl BackendConfig {
    /// Build a backend configuration from a base URL and key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse, is not
    /// http(s), or the key is blank.
    pub fn new(url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        let mut url = Url::parse(url.trim()).map_err(|e| {
            ConfigError::InvalidEnvVar("GLOWVITA_BACKEND_URL".to_string(), e.to_string())
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "GLOWVITA_BACKEND_URL".to_string(),
                format!("unsupported scheme {}", url.scheme()),
            ));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let anon_key = anon_key.trim();
        if anon_key.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "GLOWVITA_BACKEND_ANON_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            url,
            anon_key: SecretString::from(anon_key.to_string()),
        })
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if only one of the backend variables is set or
    /// either is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = get("GLOWVITA_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let backend = match (get("GLOWVITA_BACKEND_URL"), get("GLOWVITA_BACKEND_ANON_KEY")) {
            (Some(url), Some(key)) => Some(BackendConfig::new(&url, &key)?),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar(
                    "GLOWVITA_BACKEND_ANON_KEY".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar(
                    "GLOWVITA_BACKEND_URL".to_string(),
                ));
            }
        };

        Ok(Self { data_dir, backend })
    }

    /// The backend configuration, required for submitting orders.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if no backend is configured.
    pub fn require_backend(&self) -> Result<&BackendConfig, ConfigError> {
        self.backend
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GLOWVITA_BACKEND_URL".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".glowvita"));
        assert!(config.backend.is_none());
        assert!(matches!(
            config.require_backend(),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn test_backend_loaded_and_normalized() {
        let config = load(&[
            ("GLOWVITA_DATA_DIR", "/tmp/cart"),
            ("GLOWVITA_BACKEND_URL", "https://abc.supabase.co"),
            ("GLOWVITA_BACKEND_ANON_KEY", " anon-key "),
        ])
        .unwrap();

        let backend = config.require_backend().unwrap();
        assert_eq!(backend.url.as_str(), "https://abc.supabase.co/");
        assert_eq!(backend.anon_key.expose_secret(), "anon-key");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cart"));
    }

    #[test]
    fn test_backend_requires_both_vars() {
        assert!(matches!(
            load(&[("GLOWVITA_BACKEND_URL", "https://abc.supabase.co")]),
            Err(ConfigError::MissingEnvVar(var)) if var == "GLOWVITA_BACKEND_ANON_KEY"
        ));
        assert!(matches!(
            load(&[("GLOWVITA_BACKEND_ANON_KEY", "k")]),
            Err(ConfigError::MissingEnvVar(var)) if var == "GLOWVITA_BACKEND_URL"
        ));
    }

    #[test]
    fn test_backend_rejects_bad_url() {
        assert!(matches!(
            BackendConfig::new("not a url", "k"),
            Err(ConfigError::InvalidEnvVar(..))
        ));
        assert!(matches!(
            BackendConfig::new("ftp://abc.supabase.co", "k"),
            Err(ConfigError::InvalidEnvVar(..))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let backend = BackendConfig::new("https://abc.supabase.co", "super-secret").unwrap();
        let debug = format!("{backend:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
