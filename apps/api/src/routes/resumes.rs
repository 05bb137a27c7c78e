use std::path::Path;

use anyhow::Context;
use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::DocumentKind;
use crate::models::{ResumeRecord, StoredResume};
use crate::state::AppState;
use crate::store::resumes;

/// Per-file upload cap.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Session holding the parsed record for the chat endpoint.
    /// Null when the session store was unavailable.
    pub session_id: Option<Uuid>,
    /// Row id in the resumes table. Null when that insert failed.
    pub resume_id: Option<i64>,
    pub record: ResumeRecord,
    /// One entry per store that could not persist the record.
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<StoredResume>,
}

/// POST /api/v1/resumes
/// Multipart upload (`file` part): archives the raw document, runs the
/// pipeline, stores the parsed record in a session for the chat endpoint.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    info!("File upload initiated");

    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, data));
            break;
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("No file part".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(
            "File too large. Maximum size is 10MB".to_string(),
        ));
    }

    let filename = sanitize_filename(&filename);
    // Reject disallowed types before anything touches disk
    DocumentKind::from_filename(&filename)?;

    let path = Path::new(&state.config.upload_dir).join(&filename);
    tokio::fs::write(&path, &data)
        .await
        .with_context(|| format!("Failed to archive upload to {}", path.display()))?;
    info!("File saved to {}", path.display());

    let outcome = state.pipeline.process(&data, &filename).await?;

    let session_id = match state.sessions.put(&outcome.record).await {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("Failed to store parsed record in session: {e}");
            None
        }
    };

    Ok(Json(UploadResponse {
        session_id,
        resume_id: outcome.row_id,
        record: outcome.record,
        warnings: outcome.warnings,
    }))
}

/// POST /api/v1/search
/// Substring search over stored resume rows.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    info!("Resume search: {}", request.query);
    let results = resumes::search_resumes(&state.db, &request.query).await?;
    Ok(Json(SearchResponse { results }))
}

/// Strips path components and replaces non-portable characters, keeping the
/// extension intact so format detection still works on the stored name.
fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    // No hidden files out of leading dots
    cleaned.trim_start_matches('.').to_string()
}
