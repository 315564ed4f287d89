use serde::Deserialize;

use super::entities::LessonStatus;
use crate::models::Semester;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWeeklyLessonRequest {
    pub weekday: i32,
    pub start_time: String,
    pub end_time: String,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub semester: Semester,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateWeeklyLessonRequest {
    pub weekday: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub semester: Option<Semester>,
    pub status: Option<LessonStatus>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct WeeklyLessonQuery {
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub weekday: Option<i32>,
}
