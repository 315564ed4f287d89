use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::CourseService;
use super::update::check_course_ownership;
use crate::media::{MediaHost, extract_public_id_from_url};
use crate::models::courses::entities::{CourseChapter, LessonKind};
use crate::models::courses::requests::AddChapterRequest;
use crate::models::ErrorCode;
use crate::services::respond;

pub async fn add_chapter(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    chapter_data: AddChapterRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut course = match storage.get_course_by_id(course_id).await {
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

    if chapter_data.title.trim().is_empty() {
        return Ok(respond::bad_request(
            ErrorCode::InvalidChapter,
            "Chapter title is required",
        ));
    }

    course.chapters.push(CourseChapter {
        title: chapter_data.title.trim().to_string(),
        position: chapter_data.position,
        locked: false,
        admin_locked: false,
        lessons: chapter_data.lessons,
    });

    if let Err(e) = storage.save_course(&course).await {
        return Ok(respond::internal("Failed to save course", e));
    }

    Ok(respond::ok(course, "Chapter added successfully"))
}

pub async fn delete_chapter(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    chapter_index: i32,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut course = match storage.get_course_by_id(course_id).await {
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

    let index = (chapter_index - 1) as usize;
    if index >= course.chapters.len() {
        return Ok(respond::bad_request(
            ErrorCode::InvalidChapter,
            "Invalid chapter index",
        ));
    }

    // 章节里的视频资源一并清理（尽力而为）
    let removed = course.chapters.remove(index);
    let media = MediaHost::get();
    for lesson in &removed.lessons {
        if lesson.kind == LessonKind::Video
            && let Some(public_id) = extract_public_id_from_url(&lesson.content)
            && let Err(e) = media.delete_video(&public_id).await
        {
            warn!("Failed to delete chapter video {}: {}", public_id, e);
        }
    }

    if let Err(e) = storage.save_course(&course).await {
        return Ok(respond::internal("Failed to save course", e));
    }

    Ok(respond::ok(course, "Chapter deleted successfully"))
}

pub async fn delete_lesson(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    chapter_index: i32,
    lesson_index: i32,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut course = match storage.get_course_by_id(course_id).await {
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

    let chapter_idx = (chapter_index - 1) as usize;
    let Some(chapter) = course.chapters.get_mut(chapter_idx) else {
        return Ok(respond::bad_request(
            ErrorCode::InvalidChapter,
            "Invalid chapter index",
        ));
    };

    let lesson_idx = (lesson_index - 1) as usize;
    if lesson_idx >= chapter.lessons.len() {
        return Ok(respond::bad_request(
            ErrorCode::InvalidChapter,
            "Invalid lesson index",
        ));
    }

    let removed = chapter.lessons.remove(lesson_idx);
    if removed.kind == LessonKind::Video
        && let Some(public_id) = extract_public_id_from_url(&removed.content)
        && let Err(e) = MediaHost::get().delete_video(&public_id).await
    {
        warn!("Failed to delete lesson video {}: {}", public_id, e);
    }

    if let Err(e) = storage.save_course(&course).await {
        return Ok(respond::internal("Failed to save course", e));
    }

    Ok(respond::ok(course, "Lesson deleted successfully"))
}
