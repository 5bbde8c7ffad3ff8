use std::io::ErrorKind;
use std::path::Path as FsPath;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRequest;
use crate::resume::{compose_resume, render_pdf, ResumeContent};
use crate::state::AppState;

const MAX_NAME_STEM: usize = 50;

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    pub success: bool,
    pub resume_content: ResumeContent,
    pub download_url: String,
}

/// POST /api/generate-resume
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    payload: Result<Json<ResumeRequest>, JsonRejection>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let content = compose_resume(&req);

    // printpdf layout and serialization is CPU-bound
    let for_render = content.clone();
    let bytes = tokio::task::spawn_blocking(move || render_pdf(&for_render))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    let filename = pdf_filename(&content.name);
    let dir = &state.config.downloads_dir;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Cannot create {}: {e}", dir.display())))?;
    // A failed cleanup must not fail the request
    if let Err(e) = prune_downloads(dir, state.config.download_max_age).await {
        warn!("Cleanup of {} failed: {e}", dir.display());
    }
    tokio::fs::write(dir.join(&filename), &bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Cannot write {filename}: {e}")))?;

    info!(
        "Generated resume {filename} ({} bytes, {} impact gaps)",
        bytes.len(),
        content.impact_gaps.len()
    );

    Ok(Json(GenerateResumeResponse {
        success: true,
        resume_content: content,
        download_url: format!("/downloads/{filename}"),
    }))
}

/// GET /downloads/:filename
pub async fn handle_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_plain_filename(&filename) {
        return Err(AppError::Validation(format!(
            "Invalid file name '{filename}'"
        )));
    }

    let bytes = match tokio::fs::read(state.config.downloads_dir.join(&filename)).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("File '{filename}' not found")))
        }
        Err(e) => return Err(AppError::Internal(e.into())),
    };

    let content_type = match FsPath::new(&filename).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => "application/pdf",
        _ => "application/octet-stream",
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}

/// Deletes generated PDFs in `dir` last modified more than `max_age` ago.
/// Returns how many were removed.
pub async fn prune_downloads(dir: &FsPath, max_age: Duration) -> std::io::Result<usize> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut removed = 0;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            continue;
        }
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        // Clock skew makes elapsed() fail; treat that file as fresh
        let age = metadata.modified()?.elapsed().unwrap_or_default();
        if age < max_age {
            continue;
        }
        match tokio::fs::remove_file(&path).await {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    if removed > 0 {
        debug!(removed, dir = %dir.display(), "Pruned old downloads");
    }
    Ok(removed)
}

/// `<sanitized name>_<8 hex>.pdf`
pub fn pdf_filename(name: &str) -> String {
    let mut stem = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c);
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem: String = stem.trim_matches('_').chars().take(MAX_NAME_STEM).collect();
    let stem = if stem.is_empty() { "Resume".to_string() } else { stem };

    let suffix = Uuid::new_v4().simple().to_string();
    format!("{stem}_{}.pdf", &suffix[..8])
}

fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
        && !name.contains('\0')
}
