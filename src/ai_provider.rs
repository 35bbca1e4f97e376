use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AIProvider {
    Gemini,
    Ollama,
}

impl std::fmt::Display for AIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AIProvider::Gemini => write!(f, "gemini"),
            AIProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for AIProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(AIProvider::Gemini),
            "ollama" | "local" => Ok(AIProvider::Ollama),
            _ => Err(format!("Unknown AI provider: {}", s)),
        }
    }
}

impl AIProvider {
    pub fn default_model(&self) -> &'static str {
        match self {
            AIProvider::Gemini => "gemini-2.5-flash",
            AIProvider::Ollama => "qwen2.5",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AIConfig {
    pub provider: AIProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            provider: AIProvider::Gemini,
            model: AIProvider::Gemini.default_model().to_string(),
            api_key: None,
            base_url: None,
            max_tokens: Some(2048),
            temperature: Some(0.7),
        }
    }
}

/// Thin client over the supported text-generation backends.
pub struct AIProviderClient {
    config: AIConfig,
    http_client: reqwest::Client,
}

impl AIProviderClient {
    pub fn new(config: AIConfig) -> Self {
        AIProviderClient {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Whether a call can be attempted at all. Gemini needs an API
    /// key; Ollama runs locally and only needs its host to be up.
    pub fn is_configured(&self) -> bool {
        match self.config.provider {
            AIProvider::Gemini => self.config.api_key.is_some(),
            AIProvider::Ollama => true,
        }
    }

    pub async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        match self.config.provider {
            AIProvider::Gemini => self.generate_gemini(system_prompt, prompt).await,
            AIProvider::Ollama => self.generate_ollama(system_prompt, prompt).await,
        }
    }

    async fn generate_gemini(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow!("Gemini API key not configured"))?;

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.config.model, api_key
        );

        let request_body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }],
            "systemInstruction": {
                "parts": [{"text": system_prompt}]
            },
            "generationConfig": {
                "maxOutputTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            }
        });

        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error ({}): {}", status, text));
        }

        let response_json: serde_json::Value = response.json().await?;
        // A blocked or empty candidate comes back without text; the
        // caller treats an empty string as "no advice".
        let text = response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string();
        Ok(text)
    }

    async fn generate_ollama(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        let base_url = self
            .config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());
        let url = format!("{}/api/chat", base_url);

        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": prompt}
            ],
            "stream": false
        });

        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("Ollama API error: {}", response.status()));
        }

        let response_json: serde_json::Value = response.json().await?;
        let content = response_json["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("Invalid response format from Ollama"))?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!("gemini".parse::<AIProvider>().unwrap(), AIProvider::Gemini);
        assert_eq!("GOOGLE".parse::<AIProvider>().unwrap(), AIProvider::Gemini);
        assert_eq!("ollama".parse::<AIProvider>().unwrap(), AIProvider::Ollama);
        assert_eq!("local".parse::<AIProvider>().unwrap(), AIProvider::Ollama);
        assert!("claude".parse::<AIProvider>().is_err());
    }

    #[test]
    fn test_provider_display_round_trip() {
        for provider in [AIProvider::Gemini, AIProvider::Ollama] {
            let parsed: AIProvider = provider.to_string().parse().unwrap();
            assert_eq!(parsed, provider);
        }
    }

    #[test]
    fn test_gemini_needs_api_key() {
        let client = AIProviderClient::new(AIConfig::default());
        assert!(!client.is_configured());

        let client = AIProviderClient::new(AIConfig {
            api_key: Some("key".to_string()),
            ..AIConfig::default()
        });
        assert!(client.is_configured());
    }

    #[test]
    fn test_ollama_is_always_configured() {
        let client = AIProviderClient::new(AIConfig {
            provider: AIProvider::Ollama,
            model: AIProvider::Ollama.default_model().to_string(),
            ..AIConfig::default()
        });
        assert!(client.is_configured());
    }
}
