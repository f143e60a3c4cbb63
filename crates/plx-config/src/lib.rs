//! # plx-config
//!
//! Layered configuration loading for Parallax using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PARALLAX_*` prefix, `__` as separator)
//! 2. Project-level `.parallax/config.toml`
//! 3. User-level `~/.config/parallax/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PARALLAX_STORAGE__PUBLIC_BASE_URL` -> `storage.public_base_url`,
//! `PARALLAX_ENDPOINTS__SIGNING_URL` -> `endpoints.signing_url`, etc. The `__`
//! (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use plx_config::ParallaxConfig;
//!
//! let config = ParallaxConfig::load_with_dotenv().expect("config");
//! if config.endpoints.is_configured() {
//!     println!("signing endpoint: {}", config.endpoints.signing_url);
//! }
//! ```

mod endpoints;
mod error;
mod general;
mod proxy;
mod storage;

pub use endpoints::EndpointsConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use proxy::ProxyConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParallaxConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ParallaxConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for embedding
    /// hosts and tests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".parallax/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("PARALLAX_").split("__"));

        figment
    }

    /// Validate the parts a protected-asset viewer needs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SigningEndpointMissing`] when no signing
    /// endpoint is configured, and [`ConfigError::InvalidOrigin`] when the
    /// origin is empty or not an absolute `http(s)` URL.
    pub fn validate_for_protected_assets(&self) -> Result<(), ConfigError> {
        if !self.endpoints.is_configured() {
            return Err(ConfigError::SigningEndpointMissing);
        }
        let origin = self.general.origin.trim();
        if origin.is_empty() {
            return Err(ConfigError::InvalidOrigin {
                origin: origin.to_string(),
                reason: "origin is empty".to_string(),
            });
        }
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            return Err(ConfigError::InvalidOrigin {
                origin: origin.to_string(),
                reason: "origin must be an absolute http(s) URL".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("parallax").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = ParallaxConfig::default();
        assert!(!config.endpoints.is_configured());
        assert!(config.storage.bucket_hosts.is_empty());
        assert!(config.proxy.host_allowlist.is_empty());
        assert_eq!(config.general.max_retry_attempts, 2);
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = ParallaxConfig::figment();
        let config: ParallaxConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.storage.protected_segment, "model");
        assert!(config.storage.public_base_url.is_empty());
    }

    #[test]
    fn validation_for_protected_assets() {
        let mut config = ParallaxConfig::default();
        assert!(matches!(
            config.validate_for_protected_assets(),
            Err(ConfigError::SigningEndpointMissing)
        ));

        config.endpoints.signing_url = "https://api.example/signed-url".into();
        assert!(matches!(
            config.validate_for_protected_assets(),
            Err(ConfigError::InvalidOrigin { .. })
        ));

        config.general.origin = "https://app.example".into();
        assert!(config.validate_for_protected_assets().is_ok());
    }

    #[test]
    fn env_beats_toml_beats_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".parallax")?;
            jail.create_file(
                ".parallax/config.toml",
                r#"
                    [storage]
                    public_base_url = "https://cdn.from-toml.example"
                    protected_segment = "asset"

                    [general]
                    origin = "https://toml.example"
                "#,
            )?;
            jail.set_env("PARALLAX_GENERAL__ORIGIN", "https://env.example");

            let config: ParallaxConfig = ParallaxConfig::figment().extract()?;
            // env wins over TOML
            assert_eq!(config.general.origin, "https://env.example");
            // TOML wins over defaults
            assert_eq!(
                config.storage.public_base_url,
                "https://cdn.from-toml.example"
            );
            assert_eq!(config.storage.protected_segment, "asset");
            // untouched default survives
            assert_eq!(config.general.max_retry_attempts, 2);
            Ok(())
        });
    }
}
