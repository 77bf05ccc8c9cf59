//! jurisclarify-llm — Generative-AI backends and the structured
//! document-analysis call.
//!
//! Backends:
//!   GeminiBackend           — Google Gemini API (`generateContent`), with
//!                             native JSON response schemas
//!   OpenAiCompatibleBackend — any `/v1/chat/completions` endpoint
//!                             (OpenAI, Groq, OpenRouter, vLLM, …)
//!
//! `structured::analyze_document` asks a backend for the
//! summary/redFlags/glossary shape and validates the JSON at the boundary.

pub mod backend;
pub mod structured;

pub use backend::{GeminiBackend, LlmBackend, LlmError, OpenAiCompatibleBackend};
pub use structured::analyze_document;
