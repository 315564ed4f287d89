use serde::Deserialize;

use crate::models::courses::entities::LessonKind;

#[derive(Debug, Clone, Deserialize)]
pub struct CompleteLessonRequest {
    pub course_id: i64,
    pub chapter_position: i32,
    pub lesson_position: i32,
    pub kind: LessonKind,
    pub video_timestamp: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveTimestampRequest {
    pub course_id: i64,
    pub chapter_position: i32,
    pub lesson_position: i32,
    pub video_timestamp: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProgressListQuery {
    pub course_id: Option<i64>,
    pub student_id: Option<i64>,
}
