use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::StudentService;
use crate::errors::Result;
use crate::models::ErrorCode;
use crate::models::classes::responses::ClassSummary;
use crate::models::guardians::responses::GuardianSummary;
use crate::models::students::{entities::Student, responses::StudentProfile};
use crate::services::{current_school_year, current_student, respond};
use crate::storage::Storage;

/// 组装学生档案：用户信息 + 当前班级 + 监护人
///
/// 当前班级优先取本学年的在读班级，找不到时回退到学生行上的 class_id。
pub(crate) async fn build_student_profile(
    storage: &Arc<dyn Storage>,
    student: Student,
) -> Result<StudentProfile> {
    let user = storage
        .get_user_by_id(student.user_id)
        .await?
        .ok_or_else(|| crate::errors::SchoolSystemError::not_found("student user row missing"))?;

    let class = match storage
        .active_class_of_student(student.id, current_school_year())
        .await?
    {
        Some(class) => Some(class),
        None => match student.class_id {
            Some(class_id) => storage.get_class_by_id(class_id).await?,
            None => None,
        },
    };

    let guardian_ids = storage.guardian_ids_of_student(student.id).await?;
    let guardians = storage.get_guardians_by_ids(&guardian_ids).await?;

    Ok(StudentProfile {
        student,
        user,
        class: class.as_ref().map(ClassSummary::from),
        guardians: guardians.iter().map(GuardianSummary::from).collect(),
    })
}

pub async fn get_me(service: &StudentService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    match build_student_profile(&storage, student).await {
        Ok(profile) => Ok(respond::ok(profile, "Student profile retrieved")),
        Err(e) => Ok(respond::internal("Failed to build student profile", e)),
    }
}

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::StudentNotFound,
                "Student not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get student", e)),
    };

    match build_student_profile(&storage, student).await {
        Ok(profile) => Ok(respond::ok(profile, "Student profile retrieved")),
        Err(e) => Ok(respond::internal("Failed to build student profile", e)),
    }
}
