//! Configuration loading for JurisClarify.
//! Reads jurisclarify.toml from the current directory or path in JURISCLARIFY_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Browser origins allowed to call the API.
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8000 }
fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), allowed_origins: default_origins() }
    }
}

/// Where the HTTP pipeline client (CLI, or a remote front-end) finds the
/// analysis backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    #[serde(default = "default_backend_timeout")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String { "http://127.0.0.1:8000".to_string() }
fn default_backend_timeout() -> u64 { 30 }

impl Default for BackendConfig {
    fn default() -> Self {
        Self { base_url: default_backend_url(), request_timeout_secs: default_backend_timeout() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// "remote" (OCR sidecar service) or "disabled".
    #[serde(default = "default_ocr_mode")]
    pub mode: String,
    #[serde(default = "default_ocr_url")]
    pub service_url: String,
    #[serde(default = "default_ocr_timeout")]
    pub request_timeout_secs: u64,
}

fn default_ocr_mode() -> String { "disabled".to_string() }
fn default_ocr_url() -> String { "http://127.0.0.1:8884".to_string() }
fn default_ocr_timeout() -> u64 { 60 }

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            mode: default_ocr_mode(),
            service_url: default_ocr_url(),
            request_timeout_secs: default_ocr_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini" or "openai_compatible".
    #[serde(default = "default_llm_backend")]
    pub backend: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Base URL for OpenAI-compatible endpoints; unused by Gemini.
    pub base_url: Option<String>,
    #[serde(default = "default_llm_timeout")]
    pub request_timeout_secs: u64,
}

fn default_llm_backend() -> String { "gemini".to_string() }
fn default_llm_model() -> String { "gemini-1.5-flash".to_string() }
fn default_api_key_env() -> String { "GEMINI_API_KEY".to_string() }
fn default_llm_timeout() -> u64 { 60 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: default_llm_backend(),
            model: default_llm_model(),
            api_key_env: default_api_key_env(),
            base_url: None,
            request_timeout_secs: default_llm_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Advertised upload cap, enforced at the gate and on request bodies.
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
    /// Analysis input is truncated to this many characters.
    #[serde(default = "default_max_text")]
    pub max_text_chars: usize,
}

fn default_max_upload() -> usize { 10 * 1024 * 1024 }
fn default_max_text() -> usize { 3000 }

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_upload_bytes: default_max_upload(), max_text_chars: default_max_text() }
    }
}

impl Config {
    /// Load configuration from jurisclarify.toml.
    /// Checks JURISCLARIFY_CONFIG env var first, then the current directory.
    /// A missing file yields built-in defaults; a malformed file is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("JURISCLARIFY_CONFIG")
            .unwrap_or_else(|_| "jurisclarify.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
