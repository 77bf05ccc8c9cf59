//! Shared application state for the web server.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, warn};

use jurisclarify_common::config::Config;
use jurisclarify_llm::{GeminiBackend, LlmBackend, OpenAiCompatibleBackend};
use jurisclarify_ocr::{DisabledOcr, OcrEngine, RemoteOcrEngine};
use jurisclarify_pipeline::PipelineEvent;

use crate::handlers::auth::{GoogleTokenVerifier, TokenVerifier};

/// Events pushed to connected clients via SSE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A pipeline run started for an uploaded file
    AnalysisStarted { file_name: String },
    /// A pipeline stage update
    PipelineStage { run_id: String, stage: String, message: String },
    /// A pipeline run finished (success or error)
    AnalysisFinished { file_name: String, outcome: String },
    /// General system notification
    Notification { level: String, message: String },
}

impl AppEvent {
    /// SSE event name for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::AnalysisStarted { .. } => "analysis_started",
            AppEvent::PipelineStage { .. } => "pipeline_stage",
            AppEvent::AnalysisFinished { .. } => "analysis_finished",
            AppEvent::Notification { .. } => "notification",
        }
    }
}

/// Shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub ocr: Arc<dyn OcrEngine>,
    pub llm: Option<Arc<dyn LlmBackend>>,
    pub verifier: Arc<dyn TokenVerifier>,
    /// Broadcast channel for SSE push events
    pub event_tx: broadcast::Sender<AppEvent>,
    /// Stage events from running pipelines; bridged onto `event_tx`.
    pub pipeline_tx: broadcast::Sender<PipelineEvent>,
}

impl AppState {
    /// Build state from configuration. Must run inside a Tokio runtime:
    /// spawns the pipeline-event bridge.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let ocr = build_ocr_engine(&config)?;
        let llm = build_llm_backend(&config)?;
        let verifier: Arc<dyn TokenVerifier> = Arc::new(GoogleTokenVerifier::new()?);

        let (event_tx, _) = broadcast::channel(256);
        let (pipeline_tx, _) = broadcast::channel::<PipelineEvent>(256);

        // Bridge pipeline stage events onto the SSE channel.
        let bridge_tx = event_tx.clone();
        let mut bridge_rx = pipeline_tx.subscribe();
        tokio::spawn(async move {
            while let Ok(event) = bridge_rx.recv().await {
                let _ = bridge_tx.send(AppEvent::PipelineStage {
                    run_id: event.run_id.to_string(),
                    stage: event.stage,
                    message: event.message,
                });
            }
        });

        Ok(Self { config, ocr, llm, verifier, event_tx, pipeline_tx })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_tx.subscribe()
    }
}

fn build_ocr_engine(config: &Config) -> anyhow::Result<Arc<dyn OcrEngine>> {
    match config.ocr.mode.as_str() {
        "remote" => {
            info!(url = %config.ocr.service_url, "Using remote OCR engine");
            Ok(Arc::new(RemoteOcrEngine::new(
                config.ocr.service_url.clone(),
                Duration::from_secs(config.ocr.request_timeout_secs),
            )?))
        }
        "disabled" => {
            warn!("OCR disabled; uploads will be analyzed with placeholder text");
            Ok(Arc::new(DisabledOcr))
        }
        other => anyhow::bail!("unknown ocr.mode {other:?} (expected \"remote\" or \"disabled\")"),
    }
}

fn build_llm_backend(config: &Config) -> anyhow::Result<Option<Arc<dyn LlmBackend>>> {
    let timeout = Duration::from_secs(config.llm.request_timeout_secs);
    let api_key = std::env::var(&config.llm.api_key_env).ok();

    match config.llm.backend.as_str() {
        "gemini" => match api_key {
            Some(key) => {
                info!(model = %config.llm.model, "Using Gemini inference backend");
                Ok(Some(Arc::new(GeminiBackend::with_timeout(key, config.llm.model.clone(), timeout)?)))
            }
            None => {
                warn!(env = %config.llm.api_key_env, "No API key set; /ask is unavailable");
                Ok(None)
            }
        },
        "openai_compatible" => {
            let base_url = config.llm.base_url.clone().ok_or_else(|| {
                anyhow::anyhow!("llm.base_url is required for the openai_compatible backend")
            })?;
            info!(model = %config.llm.model, url = %base_url, "Using OpenAI-compatible inference backend");
            Ok(Some(Arc::new(OpenAiCompatibleBackend::with_timeout(
                base_url,
                config.llm.model.clone(),
                api_key,
                timeout,
            )?)))
        }
        other => anyhow::bail!(
            "unknown llm.backend {other:?} (expected \"gemini\" or \"openai_compatible\")"
        ),
    }
}

pub type SharedState = Arc<AppState>;
