//! # Catalog configuration: `tarifhane.toml`
//!
//! Defines the TOML configuration a host may ship next to the app (filename:
//! [`CatalogConfig::filename`] = `"tarifhane.toml"`). It decides where data is
//! stored and fills in the defaults the submission and account flows rely on.
//!
//! ## Structure
//!
//! ```toml
//! [storage]
//! namespace = "demo"                  # optional key/folder scope
//!
//! [recipes]
//! default_image = "/src/yemek/default.jpg"
//! community_category = "sizden-gelenler"
//! include_samples = true              # show the bundled sample catalog
//!
//! [accounts]
//! min_password_len = 6
//! ```
//!
//! All sections derive or implement `Default`, so a missing or empty file is the
//! default configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::COMMUNITY_CATEGORY;

/// Top-level configuration stored in `tarifhane.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub recipes: RecipesConfig,
    #[serde(default)]
    pub accounts: AccountsConfig,
}

/// Where the collections live.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Scopes storage keys (web) or the data folder (native). `None` uses the
    /// bare `users` / `recipes` / `favorites` keys.
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Recipe submission defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipesConfig {
    /// Image used when a submission carries none.
    #[serde(default = "default_image")]
    pub default_image: String,
    /// Category for drafts submitted without one.
    #[serde(default = "default_community_category")]
    pub community_category: String,
    /// Whether browsing lists the bundled sample recipes after stored ones.
    #[serde(default = "default_include_samples")]
    pub include_samples: bool,
}

/// Account form rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountsConfig {
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

fn default_image() -> String {
    "/src/yemek/default.jpg".to_string()
}

fn default_community_category() -> String {
    COMMUNITY_CATEGORY.to_string()
}

fn default_include_samples() -> bool {
    true
}

fn default_min_password_len() -> usize {
    6
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            default_image: default_image(),
            community_category: default_community_category(),
            include_samples: default_include_samples(),
        }
    }
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            min_password_len: default_min_password_len(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl CatalogConfig {
    /// Builder method to scope storage to a namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.storage.namespace = Some(namespace.into());
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "tarifhane.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load from a file; a missing file yields the default configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::from_toml(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}
