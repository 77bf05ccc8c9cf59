//! jurisclarify-common — Shared types, errors, and configuration used across all JurisClarify crates.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::ApiError;
pub use types::{AnalysisResult, DocumentKind, GlossaryEntry};
