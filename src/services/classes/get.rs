use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::ClassService;
use crate::errors::Result;
use crate::models::classes::entities::SchoolClass;
use crate::models::classes::responses::{ClassDetail, ClassStudentItem, ClassTeacherItem};
use crate::models::users::entities::UserRole;
use crate::models::ErrorCode;
use crate::middlewares::RequireJWT;
use crate::services::{current_teacher, respond};
use crate::storage::Storage;

/// 组装班级详情：学生/教师名单 + 科目
pub(crate) async fn build_class_detail(
    storage: &Arc<dyn Storage>,
    class: SchoolClass,
) -> Result<ClassDetail> {
    let mut students = Vec::new();
    for student_id in storage.student_ids_of_class(class.id).await? {
        let Some(student) = storage.get_student_by_id(student_id).await? else {
            continue;
        };
        let Some(user) = storage.get_user_by_id(student.user_id).await? else {
            continue;
        };
        students.push(ClassStudentItem {
            student_id: student.id,
            name: user.name,
            email: user.email,
            status: student.status,
            photo: user.photo,
        });
    }

    let mut teachers = Vec::new();
    for teacher_id in storage.teacher_ids_of_class(class.id).await? {
        let Some(teacher) = storage.get_teacher_by_id(teacher_id).await? else {
            continue;
        };
        let Some(user) = storage.get_user_by_id(teacher.user_id).await? else {
            continue;
        };
        let subject_ids = storage.subject_ids_of_teacher(teacher.id).await?;
        let subjects = storage.subjects_by_ids(&subject_ids).await?;
        teachers.push(ClassTeacherItem {
            teacher_id: teacher.id,
            name: user.name,
            photo: user.photo,
            subjects: subjects.into_iter().map(|s| s.name).collect(),
        });
    }

    let subject_ids = storage.subject_ids_of_class(class.id).await?;
    let subjects = storage.subjects_by_ids(&subject_ids).await?;

    Ok(ClassDetail {
        class,
        students,
        teachers,
        subjects,
    })
}

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ClassNotFound,
                "Class not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get class", e)),
    };

    // 教师只能查看自己所属或有课的班级
    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher) {
        let teacher = match current_teacher(&storage, request).await {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };

        let is_member = match storage.teacher_ids_of_class(class.id).await {
            Ok(ids) => ids.contains(&teacher.id),
            Err(e) => return Ok(respond::internal("Failed to check class membership", e)),
        };
        if !is_member {
            let has_lessons = match storage.class_ids_with_active_lessons(teacher.id).await {
                Ok(ids) => ids.contains(&class.id),
                Err(e) => return Ok(respond::internal("Failed to check teacher lessons", e)),
            };
            if !has_lessons {
                return Ok(respond::forbidden(
                    ErrorCode::ClassPermissionDenied,
                    "You do not have permission to view this class",
                ));
            }
        }
    }

    match build_class_detail(&storage, class).await {
        Ok(detail) => Ok(respond::ok(detail, "Class retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build class detail", e)),
    }
}
