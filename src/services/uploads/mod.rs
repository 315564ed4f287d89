pub mod image;
pub mod profile;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::services::respond;
use crate::storage::Storage;
use crate::utils::validate_magic_bytes;

pub struct UploadService {
    storage: Option<Arc<dyn Storage>>,
}

impl UploadService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 上传本人头像
    pub async fn upload_profile_photo(
        &self,
        req: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        profile::upload_profile_photo(self, req, payload).await
    }

    // 管理员替指定用户上传头像
    pub async fn upload_profile_photo_for(
        &self,
        req: &HttpRequest,
        user_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        profile::upload_profile_photo_for(self, req, user_id, payload).await
    }

    pub async fn delete_profile_photo(
        &self,
        req: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        profile::delete_profile_photo(self, req, user_id).await
    }

    // 通用图片上传
    pub async fn upload_image(
        &self,
        req: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        image::upload_image(self, req, payload).await
    }

    pub async fn delete_image(
        &self,
        req: &HttpRequest,
        public_id: String,
    ) -> ActixResult<HttpResponse> {
        image::delete_image(self, req, public_id).await
    }
}

/// 从 multipart 里读出一张图片（字段名 image）和附带的文本字段
///
/// 校验扩展名白名单、magic bytes 与大小上限。
pub(crate) async fn read_image_upload(
    mut payload: Multipart,
) -> Result<(Vec<u8>, std::collections::HashMap<String, String>), HttpResponse> {
    let config = AppConfig::get();
    let mut image: Option<Vec<u8>> = None;
    let mut fields = std::collections::HashMap::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let disposition = field.content_disposition();
        let name = disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "image" {
            if image.is_some() {
                return Err(respond::bad_request(
                    ErrorCode::MultifileUploadNotAllowed,
                    "Only one file can be uploaded at a time",
                ));
            }

            let file_name = disposition
                .and_then(|cd| cd.get_filename())
                .unwrap_or_default()
                .to_lowercase();
            let extension = file_name
                .rsplit_once('.')
                .map(|(_, ext)| format!(".{ext}"))
                .unwrap_or_default();
            if !config
                .upload
                .allowed_image_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&extension))
            {
                return Err(respond::bad_request(
                    ErrorCode::FileTypeNotAllowed,
                    "File type not allowed",
                ));
            }

            let mut data: Vec<u8> = Vec::new();
            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(|e| {
                    respond::bad_request(ErrorCode::FileUploadFailed, format!("Broken upload: {e}"))
                })?;

                // 第一个 chunk 时校验魔术字节
                if first_chunk {
                    first_chunk = false;
                    if !validate_magic_bytes(&chunk, &extension) {
                        return Err(respond::bad_request(
                            ErrorCode::FileTypeNotAllowed,
                            "File content does not match its extension",
                        ));
                    }
                }

                if data.len() + chunk.len() > config.upload.max_image_size {
                    return Err(respond::bad_request(
                        ErrorCode::FileSizeExceeded,
                        "File size exceeds the limit",
                    ));
                }
                data.extend_from_slice(&chunk);
            }
            image = Some(data);
        } else {
            let mut data: Vec<u8> = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(|e| {
                    respond::bad_request(ErrorCode::FileUploadFailed, format!("Broken upload: {e}"))
                })?;
                data.extend_from_slice(&chunk);
            }
            if let Ok(value) = String::from_utf8(data) {
                fields.insert(name, value);
            }
        }
    }

    match image {
        Some(image) if !image.is_empty() => Ok((image, fields)),
        _ => Err(respond::bad_request(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )),
    }
}
