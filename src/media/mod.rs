//! 云媒体托管客户端
//!
//! 头像、课程封面和课时视频都代理上传到外部媒体托管服务。
//! 请求使用 api_secret 做 SHA-1 参数签名，资源以 public_id 寻址。

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;
use sha1::{Digest, Sha1};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::{Result, SchoolSystemError};

const UPLOAD_API_BASE: &str = "https://api.cloudinary.com/v1_1";

static MEDIA_HOST: OnceLock<MediaHost> = OnceLock::new();

/// 托管服务上的一个资源
#[derive(Debug, Clone)]
pub struct MediaAsset {
    pub url: String,
    pub public_id: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub bytes: Option<u64>,
    /// 视频时长（秒），图片为 None
    pub duration: Option<f64>,
}

/// 图片上传选项
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: Option<String>,
    pub public_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadApiResponse {
    secure_url: String,
    public_id: String,
    width: Option<u32>,
    height: Option<u32>,
    bytes: Option<u64>,
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DestroyApiResponse {
    result: String,
}

pub struct MediaHost {
    client: reqwest::Client,
}

impl MediaHost {
    pub fn get() -> &'static MediaHost {
        MEDIA_HOST.get_or_init(|| MediaHost {
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(resource_type: &str, action: &str) -> String {
        let config = AppConfig::get();
        format!(
            "{UPLOAD_API_BASE}/{}/{resource_type}/{action}",
            config.media.cloud_name
        )
    }

    /// 在配置的根目录下拼接目标文件夹
    fn full_folder(folder: &str) -> String {
        let base = &AppConfig::get().media.base_folder;
        if base.is_empty() || folder.starts_with(&format!("{base}/")) {
            folder.to_string()
        } else {
            format!("{base}/{folder}")
        }
    }

    /// 上传图片
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        folder: &str,
        options: ImageOptions,
    ) -> Result<MediaAsset> {
        let mut params = BTreeMap::new();
        params.insert("folder".to_string(), Self::full_folder(folder));
        // 未指定 public_id 时生成一个，避免托管端随机命名
        let public_id = options
            .public_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        params.insert("public_id".to_string(), public_id);

        let width = options.width.unwrap_or(800);
        let height = options.height.unwrap_or(800);
        let crop = options.crop.as_deref().unwrap_or("limit");
        params.insert(
            "transformation".to_string(),
            format!("c_{crop},w_{width},h_{height},q_auto"),
        );

        self.upload(data, "image", params).await
    }

    /// 上传头像（400x400，裁切到人脸）
    pub async fn upload_profile_image(&self, data: Vec<u8>, user_id: i64) -> Result<MediaAsset> {
        let public_id = format!(
            "profile_{user_id}_{}",
            chrono::Utc::now().timestamp_millis()
        );
        let mut params = BTreeMap::new();
        params.insert("folder".to_string(), Self::full_folder("profiles"));
        params.insert("public_id".to_string(), public_id);
        params.insert(
            "transformation".to_string(),
            "c_fill,g_face,w_400,h_400,q_auto".to_string(),
        );

        self.upload(data, "image", params).await
    }

    /// 上传视频
    pub async fn upload_video(
        &self,
        data: Vec<u8>,
        folder: &str,
        public_id: &str,
    ) -> Result<MediaAsset> {
        let mut params = BTreeMap::new();
        params.insert("folder".to_string(), Self::full_folder(folder));
        params.insert("public_id".to_string(), public_id.to_string());

        self.upload(data, "video", params).await
    }

    /// 删除图片
    pub async fn delete_image(&self, public_id: &str) -> Result<()> {
        self.destroy(public_id, "image").await
    }

    /// 删除视频
    pub async fn delete_video(&self, public_id: &str) -> Result<()> {
        self.destroy(public_id, "video").await
    }

    async fn upload(
        &self,
        data: Vec<u8>,
        resource_type: &str,
        mut params: BTreeMap<String, String>,
    ) -> Result<MediaAsset> {
        let config = AppConfig::get();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        params.insert("timestamp".to_string(), timestamp);

        let signature = sign_params(&params, &config.media.api_secret);

        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(data).file_name("upload.bin"),
            )
            .text("api_key", config.media.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(Self::endpoint(resource_type, "upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SchoolSystemError::media_host(format!(
                "上传失败 ({status}): {body}"
            )));
        }

        let parsed: UploadApiResponse = response.json().await?;
        debug!("Media upload completed: {}", parsed.public_id);

        Ok(MediaAsset {
            url: parsed.secure_url,
            public_id: parsed.public_id,
            width: parsed.width,
            height: parsed.height,
            bytes: parsed.bytes,
            duration: parsed.duration,
        })
    }

    async fn destroy(&self, public_id: &str, resource_type: &str) -> Result<()> {
        let config = AppConfig::get();
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let mut params = BTreeMap::new();
        params.insert("public_id".to_string(), public_id.to_string());
        params.insert("timestamp".to_string(), timestamp);
        let signature = sign_params(&params, &config.media.api_secret);

        let form = reqwest::multipart::Form::new()
            .text("public_id", public_id.to_string())
            .text("timestamp", params["timestamp"].clone())
            .text("api_key", config.media.api_key.clone())
            .text("signature", signature);

        let response = self
            .client
            .post(Self::endpoint(resource_type, "destroy"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(SchoolSystemError::media_host(format!(
                "删除失败 ({status}): {public_id}"
            )));
        }

        let parsed: DestroyApiResponse = response.json().await?;
        if parsed.result != "ok" && parsed.result != "not found" {
            warn!("Media destroy returned '{}' for {}", parsed.result, public_id);
        }
        Ok(())
    }
}

/// 参数签名：按键排序拼接后追加 api_secret，取 SHA-1 十六进制
fn sign_params(params: &BTreeMap<String, String>, api_secret: &str) -> String {
    let joined = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// 从资源 URL 提取 public_id
///
/// URL 形如 `https://res.../<resource>/upload/v1234/folder/name.mp4`，
/// public_id 是版本号之后、扩展名之前的部分。
pub fn extract_public_id_from_url(url: &str) -> Option<String> {
    let (_, tail) = url.split_once("/upload/")?;

    let mut segments: Vec<&str> = tail.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return None;
    }

    // 跳过版本段 v<digits>
    if segments[0].len() > 1
        && segments[0].starts_with('v')
        && segments[0][1..].chars().all(|c| c.is_ascii_digit())
    {
        segments.remove(0);
    }

    if segments.is_empty() {
        return None;
    }

    // 去掉最后一段的扩展名
    let last = segments.pop()?;
    let stem = match last.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => last,
    };
    segments.push(stem);

    let public_id = segments.join("/");
    if public_id.is_empty() {
        None
    } else {
        Some(public_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_params_is_deterministic() {
        let mut params = BTreeMap::new();
        params.insert("timestamp".to_string(), "1700000000".to_string());
        params.insert("folder".to_string(), "profiles".to_string());

        let a = sign_params(&params, "secret");
        let b = sign_params(&params, "secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        assert_ne!(a, sign_params(&params, "other-secret"));
    }

    #[test]
    fn test_extract_public_id() {
        assert_eq!(
            extract_public_id_from_url(
                "https://res.example.com/demo/video/upload/v1699999999/courses/prof_a1/intro/videos/chapter_1_lesson_2.mp4"
            ),
            Some("courses/prof_a1/intro/videos/chapter_1_lesson_2".to_string())
        );
        assert_eq!(
            extract_public_id_from_url("https://res.example.com/demo/image/upload/profiles/p1.png"),
            Some("profiles/p1".to_string())
        );
        assert_eq!(extract_public_id_from_url("https://no-upload-here/x.png"), None);
    }
}
