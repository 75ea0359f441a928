mod dto;

pub use dto::{CacheSetting, ConfigFile};

use std::fs;
use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::domain::{BasePath, ErrorPolicy};

pub const DEFAULT_CACHE_CONTROL: &str = "max-age=3600";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Root directory {path} is not usable: {source}")]
    InvalidRoot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Root path is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    #[error("Invalid cache setting '{0}'")]
    InvalidCache(String),
}

/// Read-only settings shared by every listing request.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    pub root: PathBuf,
    pub base_path: BasePath,
    pub show_dotfiles: bool,
    pub hide_permissions: bool,
    pub human_readable: bool,
    pub si: bool,
    pub weak_etags: bool,
    pub cache_control: HeaderValue,
    pub error_policy: ErrorPolicy,
    pub auto_index: bool,
}

impl ListingConfig {
    /// Defaults for serving `root`, without touching the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            base_path: BasePath::root(),
            show_dotfiles: true,
            hide_permissions: false,
            human_readable: true,
            si: false,
            weak_etags: true,
            cache_control: HeaderValue::from_static(DEFAULT_CACHE_CONTROL),
            error_policy: ErrorPolicy::Respond,
            auto_index: true,
        }
    }

    /// Apply defaults to a (possibly merged) config file and validate it.
    ///
    /// The root is canonicalised so that containment checks compare like
    /// with like.
    pub fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let root = file.root.unwrap_or_else(|| PathBuf::from("."));
        let mut config = Self::new(root);

        if let Some(base_path) = file.base_path {
            config.base_path = base_path;
        }
        if let Some(cache) = file.cache {
            config.cache_control = cache_control_value(&cache)?;
        }
        config.show_dotfiles = file.show_dotfiles.unwrap_or(config.show_dotfiles);
        config.hide_permissions = file.hide_permissions.unwrap_or(config.hide_permissions);
        config.human_readable = file.human_readable.unwrap_or(config.human_readable);
        config.si = file.si.unwrap_or(config.si);
        config.weak_etags = file.weak_etags.unwrap_or(config.weak_etags);
        config.error_policy = file.error_policy.unwrap_or(config.error_policy);
        config.auto_index = file.auto_index.unwrap_or(config.auto_index);

        config.validate()?;
        Ok(config)
    }

    /// Ensure the root exists and is a directory, replacing it with its
    /// canonical form.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let canonical = self
            .root
            .canonicalize()
            .map_err(|source| ConfigError::InvalidRoot {
                path: self.root.clone(),
                source,
            })?;

        if !canonical.is_dir() {
            return Err(ConfigError::RootNotADirectory(canonical));
        }

        self.root = canonical;
        Ok(())
    }
}

fn cache_control_value(setting: &CacheSetting) -> Result<HeaderValue, ConfigError> {
    let value = match setting {
        CacheSetting::Seconds(secs) => format!("max-age={secs}"),
        CacheSetting::Text(text) => match humantime::parse_duration(text) {
            Ok(duration) => format!("max-age={}", duration.as_secs()),
            Err(_) => text.clone(),
        },
    };

    HeaderValue::from_str(&value).map_err(|_| ConfigError::InvalidCache(value))
}

/// Loads the optional TOML config file.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<ConfigFile, ConfigError> {
        let content = fs::read_to_string(&self.path)?;
        let file = toml::from_str(&content)?;
        Ok(file)
    }
}
