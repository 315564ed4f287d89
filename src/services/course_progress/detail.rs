use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseProgressService;
use crate::models::course_progress::responses::{
    ChapterProgress, CourseProgressDetail, LessonProgressItem,
};
use crate::models::ErrorCode;
use crate::services::{current_student, respond};

/// 学生查看单个课程的章节级进度
pub async fn course_progress(
    service: &CourseProgressService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let progress = match storage.find_progress(student.id, course_id).await {
        Ok(Some(progress)) => progress,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ProgressNotFound,
                "Progress not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to load progress", e)),
    };

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::CourseNotFound,
                "Course not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get course", e)),
    };

    let chapters = course
        .chapters
        .iter()
        .map(|chapter| {
            let completed: Vec<i32> = progress
                .completed_lessons
                .iter()
                .filter(|l| l.chapter_position == chapter.position)
                .map(|l| l.lesson_position)
                .collect();

            let total = chapter.lessons.len();
            let done = completed.len();

            ChapterProgress {
                chapter: chapter.title.clone(),
                position: chapter.position,
                total_lessons: total,
                completed_lessons: done,
                progress: if total > 0 {
                    (done as f64 / total as f64) * 100.0
                } else {
                    0.0
                },
                lessons: chapter
                    .lessons
                    .iter()
                    .map(|lesson| LessonProgressItem {
                        lesson: lesson.clone(),
                        completed: completed.contains(&lesson.position),
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(respond::ok(
        CourseProgressDetail {
            progress_percent: progress.progress_percent,
            status: progress.status,
            completed_at: progress.completed_at,
            last_viewed: progress.last_viewed,
            chapters,
            completed_lessons: progress.completed_lessons,
        },
        "Progress retrieved successfully",
    ))
}
