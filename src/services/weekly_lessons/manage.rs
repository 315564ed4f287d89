use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::WeeklyLessonService;
use super::list::build_lesson_views;
use crate::models::ErrorCode;
use crate::models::weekly_lessons::requests::UpdateWeeklyLessonRequest;
use crate::services::respond;
use crate::utils::time::validate_hhmm;

pub async fn get_lesson(
    service: &WeeklyLessonService,
    request: &HttpRequest,
    lesson_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let lesson = match storage.get_weekly_lesson_by_id(lesson_id).await {
        Ok(Some(lesson)) => lesson,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::LessonNotFound,
                "Lesson not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get lesson", e)),
    };

    match build_lesson_views(&storage, vec![lesson]).await {
        Ok(mut views) => Ok(respond::ok(views.remove(0), "Lesson retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build lesson view", e)),
    }
}

pub async fn update_lesson(
    service: &WeeklyLessonService,
    request: &HttpRequest,
    lesson_id: i64,
    update_data: UpdateWeeklyLessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(weekday) = update_data.weekday
        && !(0..=6).contains(&weekday)
    {
        return Ok(respond::bad_request(
            ErrorCode::BadRequest,
            "Weekday must be between 0 (Sunday) and 6 (Saturday)",
        ));
    }
    if let Some(start_time) = &update_data.start_time
        && let Err(e) = validate_hhmm(start_time)
    {
        return Ok(respond::bad_request(ErrorCode::BadRequest, e));
    }
    if let Some(end_time) = &update_data.end_time
        && let Err(e) = validate_hhmm(end_time)
    {
        return Ok(respond::bad_request(ErrorCode::BadRequest, e));
    }

    match storage.update_weekly_lesson(lesson_id, &update_data).await {
        Ok(Some(lesson)) => match build_lesson_views(&storage, vec![lesson]).await {
            Ok(mut views) => Ok(respond::ok(views.remove(0), "Lesson updated successfully")),
            Err(e) => Ok(respond::internal("Failed to build lesson view", e)),
        },
        Ok(None) => Ok(respond::not_found(
            ErrorCode::LessonNotFound,
            "Lesson not found",
        )),
        Err(e) => Ok(respond::internal("Failed to update lesson", e)),
    }
}

pub async fn delete_lesson(
    service: &WeeklyLessonService,
    request: &HttpRequest,
    lesson_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_weekly_lesson(lesson_id).await {
        Ok(true) => {
            info!("Weekly lesson {} deleted", lesson_id);
            Ok(respond::ok_empty("Lesson deleted successfully"))
        }
        Ok(false) => Ok(respond::not_found(
            ErrorCode::LessonNotFound,
            "Lesson not found",
        )),
        Err(e) => Ok(respond::internal("Failed to delete lesson", e)),
    }
}
