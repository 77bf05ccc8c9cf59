//! HTTP handlers for all web routes.

pub mod analyze;
pub mod ask;
pub mod auth;
pub mod ocr;
pub mod simplify;
pub mod system;
pub mod upload;
pub mod view;
