//! Configuration for Cachorro.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::Format;
use crate::CacheResult;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "cachorro.toml";

/// Main configuration for Cachorro.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Cache store settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Cache store settings.
///
/// This is the explicit context a [`CacheStore`](crate::cache::CacheStore) is
/// built from. When `program_name` is absent the store derives it once, at
/// construction, from the running executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding the cache files (relative paths resolve against
    /// the working directory).
    #[serde(default = "default_folder")]
    pub folder: PathBuf,

    /// Serialization format of the cache files.
    #[serde(default)]
    pub format: Format,

    /// Namespace for the cache files. Derived from the executable when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
}

impl CacheConfig {
    /// Returns a copy of this configuration with an explicit program name.
    pub fn with_program_name<S: Into<String>>(mut self, program_name: S) -> Self {
        self.program_name = Some(program_name.into());
        self
    }

    /// Returns a copy of this configuration rooted at another folder.
    pub fn with_folder<P: Into<PathBuf>>(mut self, folder: P) -> Self {
        self.folder = folder.into();
        self
    }

    /// Returns a copy of this configuration using another format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            format: Format::default(),
            program_name: None,
        }
    }
}

fn default_folder() -> PathBuf {
    PathBuf::from("saved_states")
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> CacheResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| crate::CacheError::io(path, e))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> CacheResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| crate::CacheError::io(path, e))?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            cache: CacheConfig::default(),
        }
    }

    /// Tries to load configuration from `path`, falling back to defaults
    /// when the file is missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_else(|_| Self::default_config())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "text");
        assert_eq!(config.cache.folder, PathBuf::from("saved_states"));
        assert_eq!(config.cache.format, Format::Bincode);
        assert!(config.cache.program_name.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [cache]
            format = "json"
            program_name = "pipeline"
            "#,
        )
        .unwrap();

        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.cache.folder, PathBuf::from("saved_states"));
        assert_eq!(config.cache.format, Format::Json);
        assert_eq!(config.cache.program_name.as_deref(), Some("pipeline"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cachorro.toml");

        let mut config = Config::default_config();
        config.general.log_level = "debug".to_string();
        config.cache = config.cache.with_program_name("etl").with_folder("cache");
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.general.log_level, "debug");
        assert_eq!(loaded.cache, config.cache);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load(temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(crate::CacheError::Io { .. })));
    }

    #[test]
    fn test_load_or_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cachorro.toml");

        // Arquivo ausente
        let config = Config::load_or_default(&path);
        assert_eq!(config.cache, CacheConfig::default());

        // Arquivo inválido
        std::fs::write(&path, "[general\n").unwrap();
        let config = Config::load_or_default(&path);
        assert_eq!(config.general.log_level, "info");

        // Arquivo válido
        std::fs::write(&path, "[cache]\nprogram_name = \"etl\"\n").unwrap();
        let config = Config::load_or_default(&path);
        assert_eq!(config.cache.program_name.as_deref(), Some("etl"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "[cache\nfolder = ").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(crate::CacheError::TomlParse(_))));
    }
}
