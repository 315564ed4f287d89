use serde::Serialize;

use crate::models::users::entities::ProfilePhoto;

#[derive(Debug, Clone, Serialize)]
pub struct ProfilePhotoResponse {
    pub photo: ProfilePhoto,
}

// 通用图片上传的返回信息
#[derive(Debug, Clone, Serialize)]
pub struct UploadedImageResponse {
    pub url: String,
    pub public_id: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub bytes: Option<u64>,
}
