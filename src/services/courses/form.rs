//! 课程创建表单解析
//!
//! 前端以 multipart 提交：结构化字段是 JSON 字符串（chapters、
//! allowed_class_ids），文件字段是封面（cover）与课时视频
//! （video_{chapter_idx}_{lesson_idx}，从 0 计）。

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::collections::HashMap;

use crate::config::AppConfig;
use crate::models::courses::entities::CourseChapter;
use crate::models::courses::requests::CreateCourseForm;
use crate::utils::validate_magic_bytes;

/// 解析后的 multipart 内容：文本字段 + 文件字段
pub struct CourseFormData {
    pub form: CreateCourseForm,
    pub cover: Option<Vec<u8>>,
    /// (chapter_idx, lesson_idx) -> 视频数据
    pub videos: HashMap<(usize, usize), Vec<u8>>,
}

pub enum FormError {
    Invalid(String),
    FileTooLarge(String),
    BadFileType(String),
}

/// 从扩展名猜不出类型时，靠 magic bytes 粗分图片/视频
fn looks_like_image(data: &[u8]) -> bool {
    [".jpg", ".png", ".gif", ".webp"]
        .iter()
        .any(|ext| validate_magic_bytes(data, ext))
}

fn looks_like_video(data: &[u8]) -> bool {
    [".mp4", ".webm"]
        .iter()
        .any(|ext| validate_magic_bytes(data, ext))
}

pub async fn parse_course_form(mut payload: Multipart) -> Result<CourseFormData, FormError> {
    let config = AppConfig::get();

    let mut text_fields: HashMap<String, String> = HashMap::new();
    let mut cover: Option<Vec<u8>> = None;
    let mut videos: HashMap<(usize, usize), Vec<u8>> = HashMap::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let disposition = field.content_disposition();
        let name = disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let file_name = disposition
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_lowercase();

        // 文件字段先过扩展名白名单
        if !file_name.is_empty() {
            let extension = file_name
                .rsplit_once('.')
                .map(|(_, ext)| format!(".{ext}"))
                .unwrap_or_default();
            let allowed = if name == "cover" {
                &config.upload.allowed_image_types
            } else {
                &config.upload.allowed_video_types
            };
            if !allowed.iter().any(|t| t.eq_ignore_ascii_case(&extension)) {
                return Err(FormError::BadFileType(name));
            }
        }

        let mut data: Vec<u8> = Vec::new();
        let limit = if name == "cover" {
            config.upload.max_image_size
        } else if name.starts_with("video_") {
            config.upload.max_video_size
        } else {
            // 文本字段沿用图片上限，足够容纳章节 JSON
            config.upload.max_image_size
        };

        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| FormError::Invalid(format!("Broken upload: {e}")))?;
            if data.len() + chunk.len() > limit {
                return Err(FormError::FileTooLarge(name));
            }
            data.extend_from_slice(&chunk);
        }

        if name == "cover" {
            if !looks_like_image(&data) {
                return Err(FormError::BadFileType("cover".into()));
            }
            cover = Some(data);
        } else if let Some(indices) = name.strip_prefix("video_") {
            let mut parts = indices.splitn(2, '_');
            let chapter: usize = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| FormError::Invalid(format!("Bad video field name: {name}")))?;
            let lesson: usize = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| FormError::Invalid(format!("Bad video field name: {name}")))?;
            if !looks_like_video(&data) {
                return Err(FormError::BadFileType(name));
            }
            videos.insert((chapter, lesson), data);
        } else {
            let value = String::from_utf8(data)
                .map_err(|_| FormError::Invalid(format!("Field {name} is not valid UTF-8")))?;
            text_fields.insert(name, value);
        }
    }

    let title = text_fields.remove("title").unwrap_or_default();
    let description = text_fields.remove("description").filter(|d| !d.is_empty());
    let subject_id = text_fields
        .remove("subject_id")
        .and_then(|raw| raw.parse::<i64>().ok());

    let allowed_class_ids = match text_fields.remove("allowed_class_ids") {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str::<Vec<i64>>(&raw)
            .map_err(|e| FormError::Invalid(format!("Invalid allowed_class_ids: {e}")))?,
        _ => Vec::new(),
    };

    let chapters = match text_fields.remove("chapters") {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str::<Vec<CourseChapter>>(&raw)
            .map_err(|e| FormError::Invalid(format!("Invalid chapters: {e}")))?,
        _ => Vec::new(),
    };

    Ok(CourseFormData {
        form: CreateCourseForm {
            title,
            description,
            subject_id,
            allowed_class_ids,
            chapters,
        },
        cover,
        videos,
    })
}

/// 媒体托管上的课程目录：{teacher_slug}_{id前5位}/{title_slug}
pub fn course_folder(teacher_name: &str, teacher_id: i64, title: &str) -> String {
    let teacher_slug = teacher_name.to_lowercase().replace(char::is_whitespace, "_");
    let id_prefix: String = teacher_id.to_string().chars().take(5).collect();
    let title_slug: String = title
        .to_lowercase()
        .replace(char::is_whitespace, "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    format!("courses/{teacher_slug}_{id_prefix}/{title_slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_folder() {
        assert_eq!(
            course_folder("Ana Souza", 42, "Robotics Basics!"),
            "courses/ana_souza_42/robotics_basics"
        );
        assert_eq!(
            course_folder("Jo", 1234567, "A B"),
            "courses/jo_12345/a_b"
        );
    }
}
