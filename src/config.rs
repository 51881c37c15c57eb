//! Configuration for the board store and notification queue.
//!
//! Every field has a compiled default, so an empty or partial TOML document is
//! valid. A missing config file is not an error; a file that exists but cannot
//! be read or parsed is.

use crate::error::{FlowboardError, Result};
use crate::persistence::STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowboardConfig {
    pub storage: StorageConfig,
    pub notifications: NotificationConfig,
}

/// `[storage]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Slot key the board document is stored under
    pub key: String,
    /// Project root for file storage
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: STORAGE_KEY.to_string(),
            root: PathBuf::from("."),
        }
    }
}

/// `[notifications]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long a notification stays up unless closed earlier
    pub default_duration_ms: u64,
    /// Delay between a user closing a notification and its removal
    pub closing_delay_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 3000,
            closing_delay_ms: 300,
        }
    }
}

impl NotificationConfig {
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    pub fn closing_delay(&self) -> Duration {
        Duration::from_millis(self.closing_delay_ms)
    }
}

impl FlowboardConfig {
    /// Parses a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| FlowboardError::ConfigError(e.to_string()))
    }

    /// Loads configuration from a TOML file, falling back to defaults when the
    /// file does not exist
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match tokio::fs::read_to_string(path).await {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(FlowboardError::ConfigError(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = FlowboardConfig::default();
        assert_eq!(config.storage.key, "flowboard_state_v1");
        assert_eq!(
            config.notifications.default_duration(),
            Duration::from_millis(3000)
        );
        assert_eq!(
            config.notifications.closing_delay(),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = FlowboardConfig::from_toml_str(
            r#"
            [notifications]
            default_duration_ms = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.notifications.default_duration_ms, 5000);
        assert_eq!(config.notifications.closing_delay_ms, 300);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_invalid_document_is_config_error() {
        let result = FlowboardConfig::from_toml_str("[notifications]\ndefault_duration_ms = \"soon\"");
        assert!(matches!(result, Err(FlowboardError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = FlowboardConfig::load(temp_dir.path().join("flowboard.toml"))
            .await
            .unwrap();
        assert_eq!(config, FlowboardConfig::default());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("flowboard.toml");
        tokio::fs::write(&path, "[storage]\nkey = \"board_test\"\nroot = \"/tmp/board\"\n")
            .await
            .unwrap();

        let config = FlowboardConfig::load(&path).await.unwrap();
        assert_eq!(config.storage.key, "board_test");
        assert_eq!(config.storage.root, PathBuf::from("/tmp/board"));
    }
}
