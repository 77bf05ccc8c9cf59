//! LLM backend trait and concrete implementations.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Free-form completion of a single user prompt.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Completion constrained to a JSON response schema. Returns the raw
    /// JSON text; callers validate the shape.
    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, LlmError>;

    fn model_id(&self) -> &str;
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn build_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent("JurisClarify/0.1")
        .build()?)
}

async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    let body: serde_json::Value = serde_json::from_str(&text)
        .map_err(|_| LlmError::MalformedResponse(format!("upstream returned non-JSON: {text}")))?;
    if status >= 400 {
        let msg = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(LlmError::Api { status, message: msg });
    }
    Ok(body)
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// ── 1. Google Gemini ──────────────────────────────────────────────────────────

pub struct GeminiBackend {
    pub model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(api_key, model, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            client: build_client(timeout)?,
        })
    }

    fn url(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        )
    }

    async fn generate(&self, body: serde_json::Value) -> Result<String, LlmError> {
        let resp = self.client.post(self.url()).json(&body).send().await?;
        let json = check_response_status(resp).await?;
        let content = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string();
        if content.is_empty() {
            return Err(LlmError::MalformedResponse(
                "Gemini response carried no text candidate".to_string(),
            ));
        }
        Ok(content)
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });
        self.generate(body).await
    }

    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            }
        });
        self.generate(body).await
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ── 2. OpenAI-Compatible (OpenAI, Groq, OpenRouter, vLLM, …) ─────────────────

pub struct OpenAiCompatibleBackend {
    pub base_url: String,
    pub model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiCompatibleBackend {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, LlmError> {
        Self::with_timeout(base_url, model, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            client: build_client(timeout)?,
        })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(k) => req.bearer_auth(k),
            None => req,
        }
    }

    async fn chat(&self, body: serde_json::Value) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let resp = self.auth(self.client.post(&url)).json(&body).send().await?;
        let json = check_response_status(resp).await?;
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();
        if content.is_empty() {
            return Err(LlmError::MalformedResponse(
                "chat completion carried no message content".to_string(),
            ));
        }
        Ok(content)
    }
}

#[async_trait]
impl LlmBackend for OpenAiCompatibleBackend {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "model": &self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        self.chat(body).await
    }

    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, LlmError> {
        // Not every compatible server supports response schemas; embed the
        // shape in the prompt and request a JSON object.
        let prompt = format!(
            "{prompt}\n\nRespond with a single JSON object matching this schema, \
             with no surrounding prose:\n{schema}"
        );
        let body = serde_json::json!({
            "model": &self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "response_format": { "type": "json_object" },
        });
        self.chat(body).await
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_url_embeds_model_and_key() {
        let b = GeminiBackend::new("AIza-test", "gemini-1.5-flash").unwrap();
        assert!(b.url().contains("/models/gemini-1.5-flash:generateContent"));
        assert!(b.url().ends_with("key=AIza-test"));
        assert_eq!(b.model_id(), "gemini-1.5-flash");
    }

    #[test]
    fn test_openai_compatible_with_no_key() {
        // No API key is valid for local vLLM-style servers
        let b = OpenAiCompatibleBackend::new("http://localhost:1234/", "local-model", None).unwrap();
        assert_eq!(b.model_id(), "local-model");
    }
}
