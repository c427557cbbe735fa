// Config - TOML settings for the generator, uploads and exports

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StudioConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Image generation backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted upload in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    #[serde(default = "default_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_timeout() -> u64 {
    120_000
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_mime_types() -> Vec<String> {
    vec![
        "image/png".to_string(),
        "image/jpeg".to_string(),
        "image/webp".to_string(),
    ]
}

fn default_file_prefix() -> String {
    "SnazzyHeadshot".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_ms: default_timeout(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_mime_types: default_mime_types(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
            output_dir: default_output_dir(),
        }
    }
}

impl UploadConfig {
    pub fn accepts(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime_type))
    }
}

impl StudioConfig {
    /// Default location: `<config dir>/snazzy/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("snazzy").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: StudioConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load the given file, else the default location if it exists, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => Self::from_file(default),
            _ => Ok(Self::default()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: StudioConfig = toml::from_str(
            r#"
            [generator]
            model = "custom-model"

            [upload]
            max_bytes = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.generator.model, "custom-model");
        assert_eq!(config.generator.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.upload.max_bytes, 1024);
        assert!(config.upload.accepts("IMAGE/PNG"));
        assert!(!config.upload.accepts("image/gif"));
        assert_eq!(config.export.file_prefix, "SnazzyHeadshot");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("snazzy-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let mut config = StudioConfig::default();
        config.generator.timeout_ms = 5000;
        config.to_file(&path).unwrap();

        let loaded = StudioConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.generator.timeout_ms, 5000);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let missing = Path::new("/definitely/not/here/snazzy.toml");
        assert!(matches!(StudioConfig::load(Some(missing)), Err(ConfigError::Io(_))));
    }
}
