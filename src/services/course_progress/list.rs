use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::CourseProgressService;
use crate::errors::Result;
use crate::models::course_progress::{
    entities::{CourseProgress, ProgressStatus},
    requests::ProgressListQuery,
    responses::{MyCoursesResponse, ProgressCourseSummary, ProgressView},
};
use crate::models::ErrorCode;
use crate::services::{current_student, respond};
use crate::storage::Storage;

/// 给进度行补上课程摘要
pub(crate) async fn build_progress_views(
    storage: &Arc<dyn Storage>,
    progress_rows: Vec<CourseProgress>,
) -> Result<Vec<ProgressView>> {
    let mut views = Vec::with_capacity(progress_rows.len());
    for progress in progress_rows {
        let course = match storage.get_course_by_id(progress.course_id).await? {
            Some(course) => {
                let subject_name = storage
                    .get_subject_by_id(course.subject_id)
                    .await?
                    .map(|s| s.name)
                    .unwrap_or_default();
                let teacher_name = match storage.get_teacher_by_id(course.teacher_id).await? {
                    Some(teacher) => storage
                        .get_user_by_id(teacher.user_id)
                        .await?
                        .map(|u| u.name)
                        .unwrap_or_default(),
                    None => String::new(),
                };
                Some(ProgressCourseSummary {
                    id: course.id,
                    title: course.title.clone(),
                    description: course.description.clone(),
                    subject_name,
                    teacher_name,
                    cover: course.cover.clone(),
                    total_lessons: course.total_lessons(),
                })
            }
            None => None,
        };

        views.push(ProgressView { progress, course });
    }
    Ok(views)
}

fn summarize(views: Vec<ProgressView>) -> MyCoursesResponse {
    let completed = views
        .iter()
        .filter(|v| v.progress.status == ProgressStatus::Completed)
        .count();
    let in_progress = views
        .iter()
        .filter(|v| v.progress.status == ProgressStatus::InProgress)
        .count();

    MyCoursesResponse {
        total_courses: views.len(),
        completed_courses: completed,
        in_progress_courses: in_progress,
        items: views,
    }
}

pub async fn my_courses(
    service: &CourseProgressService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let progress_rows = match storage.progress_of_student(student.id).await {
        Ok(rows) => rows,
        Err(e) => return Ok(respond::internal("Failed to list progress", e)),
    };

    match build_progress_views(&storage, progress_rows).await {
        Ok(views) => Ok(respond::ok(summarize(views), "Courses retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build progress views", e)),
    }
}

pub async fn courses_of_student(
    service: &CourseProgressService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::StudentNotFound,
                "Student not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get student", e)),
    }

    let progress_rows = match storage.progress_of_student(student_id).await {
        Ok(rows) => rows,
        Err(e) => return Ok(respond::internal("Failed to list progress", e)),
    };

    match build_progress_views(&storage, progress_rows).await {
        Ok(views) => Ok(respond::ok(summarize(views), "Courses retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build progress views", e)),
    }
}

pub async fn list_progress(
    service: &CourseProgressService,
    request: &HttpRequest,
    query: ProgressListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let progress_rows = match storage.list_progress(&query).await {
        Ok(rows) => rows,
        Err(e) => return Ok(respond::internal("Failed to list progress", e)),
    };

    match build_progress_views(&storage, progress_rows).await {
        Ok(views) => Ok(respond::ok(views, "Progress retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build progress views", e)),
    }
}
