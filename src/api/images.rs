use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use uuid::Uuid;

use crate::response::bad_request;

const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Directory uploaded images are written to, served back under `/Images`.
#[derive(Clone)]
pub struct ImagesDir(pub PathBuf);

impl ImagesDir {
    pub fn from_env() -> Self {
        Self(PathBuf::from(
            std::env::var("IMAGES_DIR").unwrap_or_else(|_| "Images".to_string()),
        ))
    }
}

/// Reads the `image` multipart field, validates it, and writes it under a
/// fresh uuid filename. Returns the relative path stored on the entity.
pub async fn save_image(images_dir: &Path, mut multipart: Multipart) -> Result<String, Response> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("image.png").to_string();
        let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(bad_request("Only image uploads are accepted"));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("Failed to read upload: {}", e)))?;
        if data.len() > MAX_IMAGE_BYTES {
            return Err(bad_request("Image exceeds the 2MB limit"));
        }

        let ext = Path::new(&file_name)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("png");
        let name = format!("{}.{}", Uuid::new_v4(), ext);

        if let Err(e) = tokio::fs::create_dir_all(images_dir).await {
            return Err(storage_error(e));
        }
        if let Err(e) = tokio::fs::write(images_dir.join(&name), &data).await {
            return Err(storage_error(e));
        }

        return Ok(format!("Images/{}", name));
    }

    Err(bad_request("Missing 'image' field"))
}

/// Best-effort unlink of a previously stored image.
pub async fn remove_image(images_dir: &Path, rel_path: &str) {
    if let Some(file) = rel_path.strip_prefix("Images/") {
        let _ = tokio::fs::remove_file(images_dir.join(file)).await;
    }
}

fn storage_error(e: std::io::Error) -> Response {
    tracing::error!("image storage error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"flag": false, "message": "Failed to store image", "data": null})),
    )
        .into_response()
}
