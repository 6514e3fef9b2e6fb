use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
}

/// Catalog provider access. The key is configuration handed to the client at
/// construction, never a literal inside the adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Recommendations shown before the first "show more".
    #[serde(default = "default_initial_visible")]
    pub initial_visible: usize,
    /// How many more each "show more" reveals.
    #[serde(default = "default_show_more_step")]
    pub show_more_step: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            initial_visible: default_initial_visible(),
            show_more_step: default_show_more_step(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/original".to_string()
}

fn default_initial_visible() -> usize {
    6
}

fn default_show_more_step() -> usize {
    9
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, raw).with_context(|| format!("Failed to write config file {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: Config = toml::from_str(
            r#"
            [provider]
            api_key = "k"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.recommendations.initial_visible, 6);
        assert_eq!(config.recommendations.show_more_step, 9);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            provider: ProviderConfig::new("secret"),
            recommendations: RecommendationConfig {
                initial_visible: 12,
                show_more_step: 18,
            },
        };
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.provider.api_key, "secret");
        assert_eq!(loaded.recommendations.initial_visible, 12);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(&dir.path().join("absent.toml")).is_err());
    }
}
