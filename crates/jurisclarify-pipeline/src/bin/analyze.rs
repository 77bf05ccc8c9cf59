//! End-to-end pipeline runner against a live backend.
//!
//! Run with: cargo run -p jurisclarify-pipeline --bin analyze -- <file> [backend-url]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use jurisclarify_common::config::Config;
use jurisclarify_pipeline::{DocumentPipeline, HttpBackendClient, UploadedFile};

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut args = std::env::args().skip(1);
    let file_path = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: analyze <file> [backend-url]"))?;

    let config = Config::load()?;
    let base_url = args.next().unwrap_or(config.backend.base_url);
    let timeout = Duration::from_secs(config.backend.request_timeout_secs);

    let path = Path::new(&file_path);
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let file = UploadedFile::new(file_name, mime_for(path), bytes);

    info!(backend = %base_url, file = %file_path, "Running analysis pipeline");

    let backend = Arc::new(HttpBackendClient::new(base_url, timeout)?);
    let mut pipeline = DocumentPipeline::new(backend.clone(), backend)
        .with_max_upload_bytes(config.limits.max_upload_bytes);

    match pipeline.run(file).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => anyhow::bail!("analysis failed: {e}"),
    }
}
