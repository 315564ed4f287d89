use serde::Deserialize;

use super::entities::{CourseChapter, CourseStatus};
use crate::models::SortOrder;

// 课程创建通过 multipart 表单提交：结构化字段是 JSON 字符串，
// 封面与视频是文件字段（capa / video_{chapter}_{lesson}）。
#[derive(Debug, Clone, Default)]
pub struct CreateCourseForm {
    pub title: String,
    pub description: Option<String>,
    pub subject_id: Option<i64>,
    pub allowed_class_ids: Vec<i64>,
    pub chapters: Vec<CourseChapter>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject_id: Option<i64>,
    pub allowed_class_ids: Option<Vec<i64>>,
    pub chapters: Option<Vec<CourseChapter>>,
    pub status: Option<CourseStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddChapterRequest {
    pub title: String,
    pub position: i32,
    #[serde(default)]
    pub lessons: Vec<super::entities::CourseLesson>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CourseListQuery {
    pub subject_id: Option<i64>,
    pub order: Option<SortOrder>,
}

/// Storage 层的新课程行，媒体上传已经完成
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub cover: Option<super::entities::MediaAssetRef>,
    pub chapters: Vec<CourseChapter>,
}
