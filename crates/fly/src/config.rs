//! Backend selection from a TOML file.

use fly_core::{Adapter, WriteOptions};
use fly_local::LocalAdapter;
use fly_s3::BucketSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Storage error: {0}")]
    Storage(#[from] fly_core::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlyConfig {
    /// Which adapter to build and how to reach it.
    pub backend: BackendConfig,
}

/// Backend selection, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Local directory tree.
    Local {
        /// Directory every path is resolved against.
        root: PathBuf,
    },

    /// S3-compatible object store.
    S3(S3Config),
}

/// Object-store settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct S3Config {
    pub bucket: String,

    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint for S3-compatible stores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Static credentials. When unset, the environment and the shared
    /// credentials profile are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// Key prefix acting as the root inside the bucket.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,

    #[serde(default)]
    pub path_style: bool,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl S3Config {
    /// Connection settings for the S3 client.
    pub fn bucket_settings(&self) -> BucketSettings {
        BucketSettings {
            region: self.region.clone(),
            endpoint: self.endpoint.clone(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            path_style: self.path_style,
        }
    }
}

impl FlyConfig {
    /// Configuration for a local root.
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendConfig::Local { root: root.into() },
        }
    }

    /// Parse and validate a TOML document.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: FlyConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.backend {
            BackendConfig::Local { root } => {
                if root.as_os_str().is_empty() {
                    return Err(ConfigError::Invalid("local root must not be empty".into()));
                }
            }
            BackendConfig::S3(s3) => {
                if s3.bucket.trim().is_empty() {
                    return Err(ConfigError::Invalid("s3 bucket must not be empty".into()));
                }
                if s3.access_key.is_some() != s3.secret_key.is_some() {
                    return Err(ConfigError::Invalid(
                        "access_key and secret_key must be set together".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Load configuration from a file.
    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let (fs, name) = config_adapter(path)?;

        if !fs.has(&name).await? {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = fs.read_to_string(&name).await?;
        Self::parse(&contents)
    }

    /// Write configuration to a file, readable by the owner only.
    pub async fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let (fs, name) = config_adapter(path)?;
        let contents = self.to_toml()?;

        fs.write(&name, contents.as_bytes(), &WriteOptions::with_mode(0o600))
            .await?;
        Ok(())
    }
}

/// Local adapter scoped to the directory holding the config file.
fn config_adapter(path: &Path) -> Result<(LocalAdapter, String), ConfigError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| ConfigError::Invalid(format!("not a file path: {}", path.display())))?
        .to_string_lossy()
        .into_owned();

    Ok((LocalAdapter::new(dir), name))
}
