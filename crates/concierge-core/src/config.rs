use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::error::{ConciergeError, Result};

/// Top-level configuration for the concierge service.
///
/// Loaded from `~/.concierge/config.toml` by default. Every section falls
/// back to its defaults when omitted, so an empty file is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConciergeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub catalog: Catalog,
}

impl ConciergeConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read, cannot be parsed, or
    /// carries an invalid catalog.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ConciergeConfig = toml::from_str(&content)?;
        config.catalog.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration if the file exists.
    ///
    /// `Ok(None)` means there is no file. Callers that configure logging from
    /// the file use this and report errors once their subscriber is up.
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed. Failures are logged as
    /// warnings, so a subscriber should already be installed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_if_exists(path) {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Render the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConciergeError::Config(e.to_string()))
    }
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Longest accepted guest message, in characters.
    pub max_message_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3040,
            max_message_length: 2000,
        }
    }
}

/// Session engine settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Seed for reply and confidence selection. `None` seeds from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::types::{Category, TimePreference};

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = ConciergeConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3040);
        assert_eq!(config.server.max_message_length, 2000);
        assert!(config.chat.rng_seed.is_none());
        assert_eq!(config.catalog, Catalog::default());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080
max_message_length = 500

[chat]
rng_seed = 7
"#;
        let file = create_temp_config(content);
        let config = ConciergeConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_message_length, 500);
        assert_eq!(config.chat.rng_seed, Some(7));
        // Catalog untouched
        assert_eq!(config.catalog, Catalog::default());
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[server]
port = 9000
"#;
        let file = create_temp_config(content);
        let config = ConciergeConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_custom_catalog() {
        let content = r#"
[catalog]
default_suggestions = ["Ask the front desk"]

[[catalog.categories]]
category = "spa"
keywords = ["massage"]

[[catalog.categories]]
category = "dining"
keywords = ["massage chair restaurant"]

[[catalog.time_patterns]]
preference = "tomorrow"
pattern = "(?i)tomorrow"

[catalog.responses.general]
general = ["How can I help?"]

[catalog.responses.spa]
general = ["Spa is open."]

[catalog.responses.spa.time_specific]
tomorrow = ["Spa tomorrow."]

[catalog.suggestions]
spa = ["Book a massage"]
"#;
        let file = create_temp_config(content);
        let config = ConciergeConfig::load(file.path()).unwrap();
        let catalog = &config.catalog;
        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.categories[0].category, Category::Spa);
        assert_eq!(catalog.time_patterns[0].preference, TimePreference::Tomorrow);
        assert_eq!(
            catalog.responses["spa"].time_specific["tomorrow"],
            vec!["Spa tomorrow.".to_string()]
        );
        assert_eq!(catalog.default_suggestions, vec!["Ask the front desk"]);
    }

    #[test]
    fn test_load_rejects_invalid_catalog() {
        let content = r#"
[catalog.responses.spa]
general = ["Spa is open."]
"#;
        let file = create_temp_config(content);
        let err = ConciergeConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConciergeError::Catalog(_)));
    }

    #[test]
    fn test_load_rejects_unknown_category_value() {
        let content = r#"
[[catalog.categories]]
category = "golf"
keywords = ["tee time"]
"#;
        let file = create_temp_config(content);
        assert!(ConciergeConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ConciergeConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config, ConciergeConfig::default());
    }

    #[test]
    fn test_load_if_exists_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(ConciergeConfig::load_if_exists(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_if_exists_reads_file() {
        let file = create_temp_config("[server]\nport = 5050\n");
        let config = ConciergeConfig::load_if_exists(file.path())
            .unwrap()
            .unwrap();
        assert_eq!(config.server.port, 5050);
    }

    #[test]
    fn test_load_if_exists_reports_bad_file() {
        let file = create_temp_config("port = [[[");
        assert!(ConciergeConfig::load_if_exists(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_bad_file_uses_defaults() {
        let file = create_temp_config("port = [[[");
        assert_eq!(
            ConciergeConfig::load_or_default(file.path()),
            ConciergeConfig::default()
        );
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        let result = ConciergeConfig::load(file.path());
        assert!(matches!(result, Err(ConciergeError::Config(_))));
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = ConciergeConfig::load(file.path()).unwrap();
        assert_eq!(config, ConciergeConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = ConciergeConfig::default();
        config.chat.rng_seed = Some(99);
        config.server.port = 4000;
        config.save(&path).unwrap();

        assert!(path.exists());
        let reloaded = ConciergeConfig::load(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_unseeded_config_omits_seed() {
        let text = ConciergeConfig::default().to_toml().unwrap();
        assert!(!text.contains("rng_seed"));
        assert!(text.contains("[server]"));
    }
}
