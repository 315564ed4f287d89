use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::CourseService;
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::courses::{
    entities::Course,
    requests::CourseListQuery,
    responses::CourseView,
};
use crate::models::users::entities::UserRole;
use crate::models::{ErrorCode, SortOrder};
use crate::services::{current_school_year, current_student, current_teacher, respond};
use crate::storage::Storage;

/// 给课程补上科目/教师名称、准入班级与报名人数
pub(crate) async fn build_course_views(
    storage: &Arc<dyn Storage>,
    courses: Vec<Course>,
    enrollment_for: Option<i64>,
) -> Result<Vec<CourseView>> {
    let mut subject_names: HashMap<i64, String> = HashMap::new();
    let mut teacher_names: HashMap<i64, String> = HashMap::new();

    let mut views = Vec::with_capacity(courses.len());
    for course in courses {
        if !subject_names.contains_key(&course.subject_id)
            && let Some(subject) = storage.get_subject_by_id(course.subject_id).await?
        {
            subject_names.insert(course.subject_id, subject.name);
        }
        if !teacher_names.contains_key(&course.teacher_id)
            && let Some(teacher) = storage.get_teacher_by_id(course.teacher_id).await?
            && let Some(user) = storage.get_user_by_id(teacher.user_id).await?
        {
            teacher_names.insert(course.teacher_id, user.name);
        }

        let allowed_class_ids = storage.class_ids_of_course(course.id).await?;
        let enrolled_ids = storage.enrolled_student_ids(course.id).await?;
        let enrolled = enrollment_for.map(|student_id| enrolled_ids.contains(&student_id));

        let subject_name = subject_names
            .get(&course.subject_id)
            .cloned()
            .unwrap_or_default();
        let teacher_name = teacher_names
            .get(&course.teacher_id)
            .cloned()
            .unwrap_or_default();

        views.push(CourseView {
            course,
            subject_name,
            teacher_name,
            allowed_class_ids,
            enrolled_count: enrolled_ids.len(),
            enrolled,
        });
    }

    Ok(views)
}

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let role = RequireJWT::extract_user_role(request);
    let (courses, enrollment_for) = match role {
        Some(UserRole::Teacher) => {
            let teacher = match current_teacher(&storage, request).await {
                Ok(teacher) => teacher,
                Err(response) => return Ok(response),
            };
            match storage.list_courses(Some(teacher.id), None, false).await {
                Ok(courses) => (courses, None),
                Err(e) => return Ok(respond::internal("Failed to list courses", e)),
            }
        }
        Some(UserRole::Student) => {
            let student = match current_student(&storage, request).await {
                Ok(student) => student,
                Err(response) => return Ok(response),
            };
            let class_id = match storage
                .active_class_of_student(student.id, current_school_year())
                .await
            {
                Ok(Some(class)) => Some(class.id),
                Ok(None) => student.class_id,
                Err(e) => return Ok(respond::internal("Failed to resolve class", e)),
            };
            let Some(class_id) = class_id else {
                return Ok(respond::ok(Vec::<CourseView>::new(), "Courses retrieved"));
            };
            match storage.list_courses(None, Some(class_id), true).await {
                Ok(courses) => (courses, Some(student.id)),
                Err(e) => return Ok(respond::internal("Failed to list courses", e)),
            }
        }
        _ => {
            // 管理员列表前顺手清理孤儿课程
            if let Ok(removed) = storage.delete_orphan_courses().await
                && removed > 0
            {
                tracing::info!("Removed {} orphan courses", removed);
            }
            match storage.list_courses(None, None, false).await {
                Ok(courses) => (courses, None),
                Err(e) => return Ok(respond::internal("Failed to list courses", e)),
            }
        }
    };

    let mut views = match build_course_views(&storage, courses, enrollment_for).await {
        Ok(views) => views,
        Err(e) => return Ok(respond::internal("Failed to build course views", e)),
    };

    if let Some(subject_id) = query.subject_id {
        views.retain(|v| v.course.subject_id == subject_id);
    }

    match query.order.unwrap_or_default() {
        SortOrder::AZ => views.sort_by(|a, b| {
            a.course
                .title
                .to_lowercase()
                .cmp(&b.course.title.to_lowercase())
        }),
        SortOrder::ZA => views.sort_by(|a, b| {
            b.course
                .title
                .to_lowercase()
                .cmp(&a.course.title.to_lowercase())
        }),
        SortOrder::Recent => views.sort_by(|a, b| b.course.created_at.cmp(&a.course.created_at)),
        SortOrder::Oldest => views.sort_by(|a, b| a.course.created_at.cmp(&b.course.created_at)),
    }

    Ok(respond::ok(views, "Courses retrieved successfully"))
}

pub async fn get_course(
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

    // 学生视角附带报名标记
    let enrollment_for = if RequireJWT::extract_user_role(request) == Some(UserRole::Student) {
        match current_student(&storage, request).await {
            Ok(student) => Some(student.id),
            Err(response) => return Ok(response),
        }
    } else {
        None
    };

    match build_course_views(&storage, vec![course], enrollment_for).await {
        Ok(mut views) => Ok(respond::ok(views.remove(0), "Course retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build course view", e)),
    }
}
