use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::ai_provider::{AIConfig, AIProvider};

/// Runtime settings: where the journey file lives and which backend
/// the mentor talks to. Nothing here is persisted; the journey file
/// is the only document this program writes.
pub struct Config {
    pub data_dir: PathBuf,
    pub provider: AIProvider,
    pub model: String,
    pub gemini_api_key: Option<String>,
    pub ollama_host: String,
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("talenttrek")
        });

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory: {}", data_dir.display())
            })?;
        }

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let ollama_host =
            env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost:11434".to_string());

        Ok(Config {
            data_dir,
            provider: AIProvider::Gemini,
            model: AIProvider::Gemini.default_model().to_string(),
            gemini_api_key,
            ollama_host,
        })
    }

    /// Apply command line overrides. Switching provider resets the
    /// model to that provider's default unless one is given too.
    pub fn with_provider(mut self, provider: Option<&str>, model: Option<&str>) -> Result<Self> {
        if let Some(name) = provider {
            self.provider = name
                .parse()
                .map_err(|e: String| anyhow::anyhow!("Invalid provider: {}", e))?;
            self.model = self.provider.default_model().to_string();
        }
        if let Some(name) = model {
            self.model = name.to_string();
        }
        Ok(self)
    }

    pub fn ai_config(&self) -> AIConfig {
        AIConfig {
            provider: self.provider,
            model: self.model.clone(),
            api_key: match self.provider {
                AIProvider::Gemini => self.gemini_api_key.clone(),
                AIProvider::Ollama => None,
            },
            base_url: match self.provider {
                AIProvider::Gemini => None,
                AIProvider::Ollama => Some(self.ollama_host.clone()),
            },
            ..AIConfig::default()
        }
    }

    /// Path of the single persisted document.
    pub fn journey_file(&self) -> PathBuf {
        self.data_dir.join("journey.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_data_dir_override() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.data_dir, dir.path());
        assert_eq!(config.journey_file(), dir.path().join("journey.json"));
    }

    #[test]
    fn test_data_dir_is_created() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep").join("nested");
        let config = Config::new(Some(nested.clone())).unwrap();
        assert!(config.data_dir.exists());
        assert_eq!(config.data_dir, nested);
    }

    #[test]
    fn test_provider_override() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf()))
            .unwrap()
            .with_provider(Some("ollama"), None)
            .unwrap();
        assert_eq!(config.provider, AIProvider::Ollama);
        assert_eq!(config.model, "qwen2.5");

        let ai = config.ai_config();
        assert_eq!(ai.provider, AIProvider::Ollama);
        assert!(ai.base_url.is_some());
    }

    #[test]
    fn test_model_override_keeps_provider() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf()))
            .unwrap()
            .with_provider(None, Some("gemini-1.5-pro"))
            .unwrap();
        assert_eq!(config.provider, AIProvider::Gemini);
        assert_eq!(config.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = Config::new(Some(dir.path().to_path_buf()))
            .unwrap()
            .with_provider(Some("skynet"), None);
        assert!(result.is_err());
    }
}
