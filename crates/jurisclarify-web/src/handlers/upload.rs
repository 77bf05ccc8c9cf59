//! Server-rendered upload pages: the idle form and the analysis result.

use axum::{
    extract::{Multipart, State},
    response::Html,
};

use jurisclarify_pipeline::UploadedFile;

use crate::handlers::analyze::run_pipeline;
use crate::handlers::ocr::read_file_field;
use crate::handlers::view::{render_analysis, render_error};
use crate::state::SharedState;

/// GET /upload — the idle state: a single-file form.
pub async fn upload_page(State(state): State<SharedState>) -> Html<String> {
    let limit_mb = state.config.limits.max_upload_bytes / (1024 * 1024);
    Html(render_page(&format!(
        r#"<p class="hint">Upload a legal document image or PDF (up to {limit_mb} MB).</p>"#
    )))
}

/// POST /upload — run the pipeline and render the result or the error.
pub async fn upload_submit(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Html<String> {
    let upload = match read_file_field(multipart).await {
        Ok((file_name, mime_type, bytes)) => UploadedFile::new(file_name, mime_type, bytes),
        Err(e) => return Html(render_page(&render_error(&e.message))),
    };

    let file_name = upload.file_name.clone();
    let body = match run_pipeline(&state, upload).await {
        Ok(result) => render_analysis(&file_name, &result),
        Err(e) => render_error(&e.to_string()),
    };
    Html(render_page(&body))
}

fn render_page(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>JurisClarify — Document Analysis</title>
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }}
        .alert.error {{ background: #fde8e8; color: #9b1c1c; padding: .75rem 1rem; border-radius: 6px; }}
        .flag {{ margin: .4rem 0; }}
        dt {{ font-weight: 600; margin-top: .6rem; }}
        .hint {{ color: #555; }}
    </style>
</head>
<body>
    <h1>⚖️ JurisClarify</h1>
    <form method="POST" action="/upload" enctype="multipart/form-data">
        <input type="file" name="file" accept="image/*,application/pdf" required>
        <button type="submit">Analyze</button>
    </form>
    {content}
</body>
</html>"#
    )
}
