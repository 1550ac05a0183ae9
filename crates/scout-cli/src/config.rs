use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use scout_tools::SearchConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchEntry,

    #[serde(default)]
    pub card: CardEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchEntry {
    /// Tavily API key (falls back to $TAVILY_API_KEY)
    #[serde(default)]
    pub tavily_api_key: Option<String>,

    /// Exa API key (falls back to $EXA_API_KEY)
    #[serde(default)]
    pub exa_api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CardEntry {
    /// Public endpoint advertised in the discovery card
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Config {
    /// Load the config file if present; a missing file is an empty config
    /// since every key has an environment fallback.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {path:?}"))?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("scout").join("config.toml"))
    }

    /// Resolve backend credentials: config file first, then environment.
    pub fn resolved_search(&self) -> SearchConfig {
        SearchConfig {
            tavily_api_key: self
                .search
                .tavily_api_key
                .clone()
                .or_else(|| std::env::var("TAVILY_API_KEY").ok()),
            exa_api_key: self
                .search
                .exa_api_key
                .clone()
                .or_else(|| std::env::var("EXA_API_KEY").ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[search]\ntavily_api_key = \"tvly-abc\"\n\n[card]\nendpoint = \"https://scout.example.org/a2a/task\"\n"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.search.tavily_api_key.as_deref(), Some("tvly-abc"));
        assert!(config.search.exa_api_key.is_none());
        assert_eq!(
            config.card.endpoint.as_deref(),
            Some("https://scout.example.org/a2a/task")
        );
    }

    #[test]
    fn test_load_from_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search\ntavily_api_key = 3").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.search.tavily_api_key.is_none());
        assert!(config.card.endpoint.is_none());
    }

    #[test]
    fn test_config_key_takes_precedence_over_env() {
        let config = Config {
            search: SearchEntry {
                tavily_api_key: Some("from-config".to_string()),
                exa_api_key: None,
            },
            card: CardEntry::default(),
        };

        let resolved = config.resolved_search();
        assert_eq!(resolved.tavily_api_key.as_deref(), Some("from-config"));
    }
}
