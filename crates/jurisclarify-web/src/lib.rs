//! jurisclarify-web — HTTP service for JurisClarify
//! Provides:
//!   - The analysis backend (`/ocr`, `/simplify`)
//!   - The full in-process pipeline (`/analyze`, `/upload` pages)
//!   - The inference relay (`/ask`)
//!   - Identity lookup (`/auth/me`)
//!   - Live pipeline events over SSE (`/api/events`)

pub mod engines;
pub mod handlers;
pub mod router;
pub mod sse;
pub mod state;
