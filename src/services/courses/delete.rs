use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::CourseService;
use super::update::check_course_ownership;
use crate::media::{MediaHost, extract_public_id_from_url};
use crate::models::courses::entities::LessonKind;
use crate::models::ErrorCode;
use crate::services::respond;

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    if let Err(response) = check_course_ownership(&storage, request, &course).await {
        return Ok(response);
    }

    // 媒体资源清理失败不阻塞删除
    let media = MediaHost::get();
    if let Some(cover) = &course.cover
        && let Err(e) = media.delete_image(&cover.public_id).await
    {
        warn!("Failed to delete course cover {}: {}", cover.public_id, e);
    }
    for chapter in &course.chapters {
        for lesson in &chapter.lessons {
            if lesson.kind == LessonKind::Video
                && let Some(public_id) = extract_public_id_from_url(&lesson.content)
                && let Err(e) = media.delete_video(&public_id).await
            {
                warn!("Failed to delete lesson video {}: {}", public_id, e);
            }
        }
    }

    if let Err(e) = storage.delete_progress_of_course(course_id).await {
        return Ok(respond::internal("Failed to delete course progress", e));
    }

    // 报名与准入关联随外键一起清除
    match storage.delete_course(course_id).await {
        Ok(true) => {
            info!("Course {} deleted", course_id);
            Ok(respond::ok_empty("Course deleted successfully"))
        }
        Ok(false) => Ok(respond::not_found(
            ErrorCode::CourseNotFound,
            "Course not found",
        )),
        Err(e) => Ok(respond::internal("Failed to delete course", e)),
    }
}
