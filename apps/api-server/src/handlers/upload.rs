//! Image upload relay.

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures::StreamExt;

use blogify_core::ports::MediaUpload;
use blogify_shared::dto::UploadResponse;

use super::MAX_BODY_BYTES;
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const FILE_FIELD: &str = "image";

/// POST /upload
///
/// Accepts the `image` field, or failing that the first field that carries a filename.
pub async fn upload_image(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    if state.settings.upload_requires_auth && identity.0.is_none() {
        return Err(AppError::Unauthorized(
            "Please login to upload images".to_string(),
        ));
    }

    let mut upload = None;
    while let Some(item) = payload.next().await {
        let field = item.map_err(|e| {
            tracing::warn!(error = %e, "Malformed multipart body");
            AppError::BadRequest("Upload failed".to_string())
        })?;

        let Some(filename) = file_name(&field) else {
            continue;
        };
        upload = Some(read_file(field, filename).await?);
        break;
    }

    let file = upload.ok_or_else(|| AppError::BadRequest("Upload failed".to_string()))?;
    let size = file.bytes.len();
    let url = state.media.upload(file).await?;

    tracing::info!(size, uploaded_by = ?identity.0.map(|i| i.user_id), "Image uploaded");

    Ok(HttpResponse::Ok().json(UploadResponse { url }))
}

/// The file name to forward when `field` holds the upload.
fn file_name(field: &Field) -> Option<String> {
    let disposition = field.content_disposition()?;
    match disposition.get_filename() {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ if disposition.get_name() == Some(FILE_FIELD) => Some("upload".to_string()),
        _ => None,
    }
}

async fn read_file(mut field: Field, filename: String) -> AppResult<MediaUpload> {
    let content_type = field.content_type().map(|mime| mime.to_string());
    let mut bytes = Vec::new();

    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| {
            tracing::warn!(error = %e, "Error reading upload field");
            AppError::BadRequest("Upload failed".to_string())
        })?;
        if bytes.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(AppError::PayloadTooLarge(
                "Uploads are limited to 10 MiB".to_string(),
            ));
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.is_empty() {
        return Err(AppError::BadRequest("Upload failed".to_string()));
    }

    Ok(MediaUpload {
        filename,
        content_type,
        bytes,
    })
}
