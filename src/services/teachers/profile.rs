use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use std::sync::Arc;

use super::TeacherService;
use crate::errors::Result;
use crate::models::ErrorCode;
use crate::models::classes::responses::ClassSummary;
use crate::models::teachers::{entities::Teacher, responses::TeacherProfile};
use crate::services::{current_teacher, respond};
use crate::storage::Storage;

/// 组装教师档案：用户 + 科目 + 班级（成员班级 ∪ 有课班级，去重）+ 课程
pub(crate) async fn build_teacher_profile(
    storage: &Arc<dyn Storage>,
    teacher: Teacher,
) -> Result<TeacherProfile> {
    let user = storage
        .get_user_by_id(teacher.user_id)
        .await?
        .ok_or_else(|| crate::errors::SchoolSystemError::not_found("teacher user row missing"))?;

    let subject_ids = storage.subject_ids_of_teacher(teacher.id).await?;
    let subjects = storage.subjects_by_ids(&subject_ids).await?;

    // 成员班级和有课班级的并集
    let mut classes = storage.classes_of_teacher(teacher.id).await?;
    let mut seen: HashSet<i64> = classes.iter().map(|c| c.id).collect();
    for class_id in storage.class_ids_with_active_lessons(teacher.id).await? {
        if seen.insert(class_id)
            && let Some(class) = storage.get_class_by_id(class_id).await?
        {
            classes.push(class);
        }
    }

    let courses = storage.courses_of_teacher(teacher.id).await?;

    Ok(TeacherProfile {
        teacher,
        user,
        subjects,
        classes: classes.iter().map(ClassSummary::from).collect(),
        courses,
    })
}

pub async fn get_me(service: &TeacherService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match current_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(response) => return Ok(response),
    };

    match build_teacher_profile(&storage, teacher).await {
        Ok(profile) => Ok(respond::ok(profile, "Teacher profile retrieved")),
        Err(e) => Ok(respond::internal("Failed to build teacher profile", e)),
    }
}

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get teacher", e)),
    };

    match build_teacher_profile(&storage, teacher).await {
        Ok(profile) => Ok(respond::ok(profile, "Teacher profile retrieved")),
        Err(e) => Ok(respond::internal("Failed to build teacher profile", e)),
    }
}
