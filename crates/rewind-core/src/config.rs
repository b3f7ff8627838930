#![forbid(unsafe_code)]

//! History adapter configuration.
//!
//! With the `adapter-config` feature the configuration can be loaded from
//! TOML or JSON at startup:
//!
//! ```toml
//! # rewind.toml
//! limit = 100
//! ```
//!
//! ```rust,ignore
//! let config = HistoryAdapterConfig::from_toml_file("rewind.toml")?;
//! let config = HistoryAdapterConfig::from_json_str(r#"{ "limit": 50 }"#)?;
//! ```
//!
//! A missing `limit` means unbounded history. A limit of zero is rejected at
//! parse time.

use std::num::NonZeroUsize;
#[cfg(feature = "adapter-config")]
use std::path::Path;

#[cfg(feature = "adapter-config")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`HistoryAdapter`](crate::HistoryAdapter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "adapter-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "adapter-config", serde(default, deny_unknown_fields))]
pub struct HistoryAdapterConfig {
    /// Maximum number of frames kept in `past`. `None` is unbounded.
    pub limit: Option<NonZeroUsize>,
}

impl HistoryAdapterConfig {
    /// Unbounded history.
    #[must_use]
    pub const fn new() -> Self {
        Self { limit: None }
    }

    /// Unbounded history (alias of [`new`](Self::new), for call-site clarity).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self::new()
    }

    /// Keep at most `limit` frames in `past`.
    #[must_use]
    pub const fn with_limit(mut self, limit: NonZeroUsize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The configured limit.
    #[must_use]
    pub const fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }

    /// Load from a TOML string.
    #[cfg(feature = "adapter-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "adapter-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "adapter-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "adapter-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }
}

/// Errors that can occur when loading an adapter configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "adapter-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "adapter-config")]
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "adapter-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "adapter-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "adapter-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "adapter-config")]
            Self::Json(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded() {
        assert_eq!(HistoryAdapterConfig::default().limit(), None);
        assert_eq!(HistoryAdapterConfig::unlimited(), HistoryAdapterConfig::new());
    }

    #[test]
    fn with_limit_sets_limit() {
        let limit = NonZeroUsize::new(3).unwrap();
        let config = HistoryAdapterConfig::new().with_limit(limit);
        assert_eq!(config.limit(), Some(limit));
    }

    #[test]
    fn io_error_display_and_source() {
        use std::error::Error as _;

        let err = ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(err.to_string().starts_with("I/O error"));
        assert!(err.source().is_some());
    }
}
