use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseProgressService;
use crate::models::course_progress::entities::{CompletedLesson, LessonPointer};
use crate::models::course_progress::requests::{CompleteLessonRequest, SaveTimestampRequest};
use crate::models::courses::entities::LessonKind;
use crate::models::ErrorCode;
use crate::services::{current_student, respond};

pub async fn complete_lesson(
    service: &CourseProgressService,
    request: &HttpRequest,
    complete_data: CompleteLessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let course = match storage.get_course_by_id(complete_data.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::CourseNotFound,
                "Course not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get course", e)),
    };

    match storage.is_student_enrolled(course.id, student.id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(respond::forbidden(
                ErrorCode::NotEnrolled,
                "Student is not enrolled in this course",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to check enrollment", e)),
    }

    // 进度行在报名时创建；老数据缺失时补建
    let mut progress = match storage.find_progress(student.id, course.id).await {
        Ok(Some(progress)) => progress,
        Ok(None) => match storage.create_progress(student.id, course.id).await {
            Ok(progress) => progress,
            Err(e) => return Ok(respond::internal("Failed to create progress", e)),
        },
        Err(e) => return Ok(respond::internal("Failed to load progress", e)),
    };

    progress.last_viewed = Some(LessonPointer {
        chapter_position: complete_data.chapter_position,
        lesson_position: complete_data.lesson_position,
    });

    match progress.find_completed(complete_data.chapter_position, complete_data.lesson_position) {
        // 已完成过：只更新视频播放位置
        Some(index) => {
            if complete_data.kind == LessonKind::Video
                && let Some(timestamp) = complete_data.video_timestamp
            {
                progress.completed_lessons[index].video_timestamp = timestamp;
            }
        }
        None => {
            progress.completed_lessons.push(CompletedLesson {
                chapter_position: complete_data.chapter_position,
                lesson_position: complete_data.lesson_position,
                kind: complete_data.kind,
                completed_at: chrono::Utc::now(),
                video_timestamp: if complete_data.kind == LessonKind::Video {
                    complete_data.video_timestamp.unwrap_or(0)
                } else {
                    0
                },
            });
            progress.recalculate(&course);
        }
    }

    if let Err(e) = storage.save_progress(&progress).await {
        return Ok(respond::internal("Failed to save progress", e));
    }

    Ok(respond::ok(progress, "Lesson marked as completed"))
}

pub async fn save_video_timestamp(
    service: &CourseProgressService,
    request: &HttpRequest,
    timestamp_data: SaveTimestampRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let mut progress = match storage
        .find_progress(student.id, timestamp_data.course_id)
        .await
    {
        Ok(Some(progress)) => progress,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ProgressNotFound,
                "Progress not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to load progress", e)),
    };

    progress.last_viewed = Some(LessonPointer {
        chapter_position: timestamp_data.chapter_position,
        lesson_position: timestamp_data.lesson_position,
    });

    // 只更新播放位置，完成状态只能由 complete_lesson 改变
    if let Some(index) = progress.find_completed(
        timestamp_data.chapter_position,
        timestamp_data.lesson_position,
    ) {
        progress.completed_lessons[index].video_timestamp = timestamp_data.video_timestamp;
    }

    if let Err(e) = storage.save_progress(&progress).await {
        return Ok(respond::internal("Failed to save progress", e));
    }

    Ok(respond::ok_empty("Timestamp saved"))
}
