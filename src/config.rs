use crate::errors::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Explicit yt-dlp binary; when unset the PATH lookup applies.
    pub ytdlp_path: Option<PathBuf>,
    pub saavn_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Interface language sent to the YouTube Music API.
    pub language: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            saavn_base_url: "https://saavn.dev/api".to_string(),
            request_timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            language: "en".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: AppConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            let config = AppConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Loads from an explicit file when one is given, otherwise from the
    /// default location.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&content)?)
            }
            None => Self::load(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        let config_dir = config_path.parent().unwrap();

        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            AppError::Config(config::ConfigError::Message(
                "Could not find config directory".to_string(),
            ))
        })?;

        Ok(config_dir.join("music-bridge").join("config.json"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.saavn_base_url, "https://saavn.dev/api");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.ytdlp_path, None);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_round_trip() {
        let config = AppConfig::default();
        let serialized = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed.saavn_base_url, config.saavn_base_url);
        assert_eq!(parsed.user_agent, config.user_agent);
        assert_eq!(parsed.language, config.language);
    }
}
