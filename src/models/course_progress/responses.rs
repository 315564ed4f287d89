use serde::Serialize;

use super::entities::{CompletedLesson, CourseProgress, LessonPointer, ProgressStatus};
use crate::models::courses::entities::{CourseLesson, MediaAssetRef};

// 进度条目上的课程摘要
#[derive(Debug, Clone, Serialize)]
pub struct ProgressCourseSummary {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject_name: String,
    pub teacher_name: String,
    pub cover: Option<MediaAssetRef>,
    pub total_lessons: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    #[serde(flatten)]
    pub progress: CourseProgress,
    pub course: Option<ProgressCourseSummary>,
}

// 学生的课程总览
#[derive(Debug, Clone, Serialize)]
pub struct MyCoursesResponse {
    pub total_courses: usize,
    pub completed_courses: usize,
    pub in_progress_courses: usize,
    pub items: Vec<ProgressView>,
}

// 单个课时 + 完成标记
#[derive(Debug, Clone, Serialize)]
pub struct LessonProgressItem {
    #[serde(flatten)]
    pub lesson: CourseLesson,
    pub completed: bool,
}

// 单个章节的进度明细
#[derive(Debug, Clone, Serialize)]
pub struct ChapterProgress {
    pub chapter: String,
    pub position: i32,
    pub total_lessons: usize,
    pub completed_lessons: usize,
    pub progress: f64,
    pub lessons: Vec<LessonProgressItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseProgressDetail {
    pub progress_percent: i32,
    pub status: ProgressStatus,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_viewed: Option<LessonPointer>,
    pub chapters: Vec<ChapterProgress>,
    pub completed_lessons: Vec<CompletedLesson>,
}
