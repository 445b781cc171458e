//! Research-gap language model clients
//!
//! Builds a conditional prompt from whatever relevant sections the
//! document produced and asks an LLM to describe the research gaps.
//! Supports OpenAI-compatible APIs and Ollama.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use scigap_core::{LlmConfig, LlmProvider, Result, ScigapError, SectionKind, SectionMap};

const SYSTEM_PROMPT: &str =
    "You are an AI specialized in identifying research gaps in scientific articles.";

/// Trait for research-gap models
#[async_trait]
pub trait GapModel: Send + Sync {
    /// Produce research-gap prose from the extracted sections.
    async fn identify_gaps(&self, sections: &SectionMap) -> Result<String>;
}

/// Build the user prompt from the sections present.
///
/// Only sections that actually exist are appended; when none of the
/// relevant sections are present the request is rejected before any
/// model call.
pub fn build_gap_prompt(sections: &SectionMap) -> Result<String> {
    let mut relevant = Vec::new();
    for kind in SectionKind::ALL {
        if let Some(body) = sections.get(kind.as_str()) {
            if !body.trim().is_empty() {
                relevant.push((kind, body));
            }
        }
    }

    if relevant.is_empty() {
        return Err(ScigapError::InvalidInput(
            "No relevant sections found in the data.".to_string(),
        ));
    }

    let mut prompt = String::from(
        "Below are sections from a scientific article. Identify and describe any research gaps present in the text.",
    );
    for (kind, body) in relevant {
        let title = match kind {
            SectionKind::Discussion => "Discussion",
            SectionKind::Conclusion => "Conclusion",
            SectionKind::Limitation => "Limitation",
        };
        prompt.push_str(&format!("\n\n{title}:\n{body}"));
    }
    prompt.push_str("\n\nPlease provide the main research gaps identified in the text.");

    Ok(prompt)
}

// ============================================================================
// OpenAI-compatible client
// ============================================================================

/// OpenAI chat-completions client
pub struct OpenAiGapClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

impl OpenAiGapClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Create from config
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .openai_api_key
            .as_ref()
            .ok_or_else(|| ScigapError::Config("OpenAI API key required".to_string()))?;

        let base_url = config
            .openai_base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());

        Ok(Self {
            client: Client::new(),
            api_key: api_key.clone(),
            base_url,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Set custom base URL (for Azure or compatible APIs)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl GapModel for OpenAiGapClient {
    async fn identify_gaps(&self, sections: &SectionMap) -> Result<String> {
        let prompt = build_gap_prompt(sections)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ScigapError::Llm(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScigapError::Llm(format!("Model error: {error_text}")));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| ScigapError::Llm(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| ScigapError::Llm("No response generated".to_string()))
    }
}

// ============================================================================
// Ollama client
// ============================================================================

/// Ollama generate-endpoint client
pub struct OllamaGapClient {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    system: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaGapClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(config.ollama_url.clone(), config.model.clone())
    }
}

#[async_trait]
impl GapModel for OllamaGapClient {
    async fn identify_gaps(&self, sections: &SectionMap) -> Result<String> {
        let prompt = build_gap_prompt(sections)?;

        let request = OllamaRequest {
            model: self.model.clone(),
            prompt,
            system: SYSTEM_PROMPT.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ScigapError::Llm(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScigapError::Llm(format!("Model error: {error_text}")));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| ScigapError::Llm(format!("Failed to parse response: {e}")))?;

        Ok(result.response.trim().to_string())
    }
}

/// Create a gap model client for the configured provider
pub fn create_gap_client(config: &LlmConfig) -> Result<Arc<dyn GapModel>> {
    match config.provider {
        LlmProvider::OpenAI | LlmProvider::Azure => {
            Ok(Arc::new(OpenAiGapClient::from_config(config)?))
        }
        LlmProvider::Ollama => Ok(Arc::new(OllamaGapClient::from_config(config))),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(entries: &[(&str, &str)]) -> SectionMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_prompt_appends_only_present_sections() {
        let prompt = build_gap_prompt(&sections(&[
            ("discussion", "findings here"),
            ("limitation", "small sample"),
        ]))
        .unwrap();

        assert!(prompt.contains("Discussion:\nfindings here"));
        assert!(prompt.contains("Limitation:\nsmall sample"));
        assert!(!prompt.contains("Conclusion:"));
        assert!(prompt.ends_with("Please provide the main research gaps identified in the text."));
    }

    #[test]
    fn test_prompt_rejects_when_no_relevant_section() {
        let err = build_gap_prompt(&SectionMap::new()).unwrap_err();
        assert!(matches!(err, ScigapError::InvalidInput(_)));

        // Unknown keys and empty bodies do not count
        let err = build_gap_prompt(&sections(&[("abstract", "x"), ("discussion", "  ")]))
            .unwrap_err();
        assert!(matches!(err, ScigapError::InvalidInput(_)));
    }

    #[test]
    fn test_openai_client_requires_api_key() {
        let config = LlmConfig::default();
        assert!(OpenAiGapClient::from_config(&config).is_err());
    }

    #[test]
    fn test_factory_honors_provider() {
        let config = LlmConfig {
            provider: LlmProvider::Ollama,
            ..Default::default()
        };
        assert!(create_gap_client(&config).is_ok());
    }
}
