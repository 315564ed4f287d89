use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::WeeklyLessonService;
use crate::models::weekly_lessons::requests::CreateWeeklyLessonRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond;
use crate::utils::time::{parse_hhmm, validate_hhmm};

pub async fn create_lesson(
    service: &WeeklyLessonService,
    request: &HttpRequest,
    lesson_data: CreateWeeklyLessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if !(0..=6).contains(&lesson_data.weekday) {
        return Ok(respond::bad_request(
            ErrorCode::BadRequest,
            "Weekday must be between 0 (Sunday) and 6 (Saturday)",
        ));
    }
    if let Err(e) = validate_hhmm(&lesson_data.start_time) {
        return Ok(respond::bad_request(ErrorCode::BadRequest, e));
    }
    if let Err(e) = validate_hhmm(&lesson_data.end_time) {
        return Ok(respond::bad_request(ErrorCode::BadRequest, e));
    }
    if parse_hhmm(&lesson_data.start_time) >= parse_hhmm(&lesson_data.end_time) {
        return Ok(respond::bad_request(
            ErrorCode::BadRequest,
            "Start time must be before end time",
        ));
    }

    match storage.get_class_by_id(lesson_data.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ClassNotFound,
                "Class not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get class", e)),
    }

    match storage.get_teacher_by_id(lesson_data.teacher_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get teacher", e)),
    }

    // 教师同一时段不能有两节课
    match storage
        .find_teacher_time_conflict(
            lesson_data.teacher_id,
            lesson_data.weekday,
            &lesson_data.start_time,
            &lesson_data.end_time,
        )
        .await
    {
        Ok(Some(_)) => {
            return Ok(respond::bad_request(
                ErrorCode::LessonConflict,
                "The teacher already has a lesson in this time slot",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(respond::internal("Failed to check time conflict", e)),
    }

    let lesson = match storage.create_weekly_lesson(&lesson_data).await {
        Ok(lesson) => lesson,
        Err(e) => return Ok(respond::internal("Failed to create weekly lesson", e)),
    };

    // 开课即把教师挂进班级（幂等）
    if let Err(e) = storage
        .add_class_teacher(lesson.class_id, lesson.teacher_id)
        .await
    {
        tracing::warn!("Failed to link teacher to class: {}", e);
    }

    info!("Weekly lesson {} created", lesson.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        lesson,
        "Weekly lesson created successfully",
    )))
}
