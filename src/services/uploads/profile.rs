use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{UploadService, read_image_upload};
use crate::media::MediaHost;
use crate::middlewares::RequireJWT;
use crate::models::uploads::responses::ProfilePhotoResponse;
use crate::models::users::entities::ProfilePhoto;
use crate::models::ErrorCode;
use crate::services::respond;

async fn replace_photo(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    user_id: i64,
    image: Vec<u8>,
) -> Result<ProfilePhoto, HttpResponse> {
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err(respond::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        Err(e) => return Err(respond::internal("Failed to get user", e)),
    };

    let media = MediaHost::get();
    let asset = media
        .upload_profile_image(image, user_id)
        .await
        .map_err(|e| respond::internal("Failed to upload profile photo", e))?;

    // 旧头像尽力清理，不阻塞新头像保存
    if let Some(old) = &user.photo
        && let Err(e) = media.delete_image(&old.public_id).await
    {
        warn!("Failed to delete old avatar {}: {}", old.public_id, e);
    }

    let photo = ProfilePhoto {
        url: asset.url,
        public_id: asset.public_id,
    };
    storage
        .set_user_photo(user_id, Some(photo.clone()))
        .await
        .map_err(|e| respond::internal("Failed to save profile photo", e))?;

    Ok(photo)
}

pub async fn upload_profile_photo(
    service: &UploadService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user_id = match RequireJWT::extract_user_id(request) {
        Some(user_id) => user_id,
        None => return Ok(respond::unauthorized("Unauthorized: missing user id")),
    };

    let (image, _fields) = match read_image_upload(payload).await {
        Ok(parts) => parts,
        Err(response) => return Ok(response),
    };

    match replace_photo(&storage, user_id, image).await {
        Ok(photo) => {
            info!("Profile photo updated for user {}", user_id);
            Ok(respond::ok(
                ProfilePhotoResponse { photo },
                "Profile photo updated successfully",
            ))
        }
        Err(response) => Ok(response),
    }
}

pub async fn upload_profile_photo_for(
    service: &UploadService,
    request: &HttpRequest,
    user_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (image, _fields) = match read_image_upload(payload).await {
        Ok(parts) => parts,
        Err(response) => return Ok(response),
    };

    match replace_photo(&storage, user_id, image).await {
        Ok(photo) => {
            info!("Profile photo updated for user {}", user_id);
            Ok(respond::ok(
                ProfilePhotoResponse { photo },
                "Profile photo updated successfully",
            ))
        }
        Err(response) => Ok(response),
    }
}

pub async fn delete_profile_photo(
    service: &UploadService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get user", e)),
    };

    let Some(photo) = &user.photo else {
        // 没有头像时直接算成功
        return Ok(respond::ok_empty("User has no profile photo"));
    };

    if let Err(e) = MediaHost::get().delete_image(&photo.public_id).await {
        warn!("Failed to delete avatar {}: {}", photo.public_id, e);
    }

    match storage.set_user_photo(user_id, None).await {
        Ok(_) => {
            info!("Profile photo removed for user {}", user_id);
            Ok(respond::ok_empty("Profile photo deleted successfully"))
        }
        Err(e) => Ok(respond::internal("Failed to remove profile photo", e)),
    }
}
