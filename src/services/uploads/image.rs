use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{UploadService, read_image_upload};
use crate::media::{ImageOptions, MediaHost};
use crate::models::uploads::responses::UploadedImageResponse;
use crate::models::ErrorCode;
use crate::services::respond;

/// 通用图片上传：可选 folder / width / height / crop 文本字段
pub async fn upload_image(
    _service: &UploadService,
    _request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let (image, fields) = match read_image_upload(payload).await {
        Ok(parts) => parts,
        Err(response) => return Ok(response),
    };

    let folder = fields
        .get("folder")
        .cloned()
        .unwrap_or_else(|| "uploads".to_string());
    let options = ImageOptions {
        width: fields.get("width").and_then(|raw| raw.parse().ok()),
        height: fields.get("height").and_then(|raw| raw.parse().ok()),
        crop: fields.get("crop").cloned(),
        public_id: None,
    };

    match MediaHost::get().upload_image(image, &folder, options).await {
        Ok(asset) => {
            info!("Image uploaded to {}", asset.public_id);
            Ok(respond::ok(
                UploadedImageResponse {
                    url: asset.url,
                    public_id: asset.public_id,
                    width: asset.width,
                    height: asset.height,
                    bytes: asset.bytes,
                },
                "Image uploaded successfully",
            ))
        }
        Err(e) => Ok(respond::internal("Failed to upload image", e)),
    }
}

pub async fn delete_image(
    _service: &UploadService,
    _request: &HttpRequest,
    public_id: String,
) -> ActixResult<HttpResponse> {
    match MediaHost::get().delete_image(&public_id).await {
        Ok(()) => {
            info!("Image {} deleted", public_id);
            Ok(respond::ok_empty("Image deleted successfully"))
        }
        Err(e) => {
            tracing::error!("Failed to delete image {}: {}", public_id, e);
            Ok(respond::bad_request(
                ErrorCode::MediaDeleteFailed,
                format!("Failed to delete image: {e}"),
            ))
        }
    }
}
