use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::middlewares::RequireJWT;
use crate::models::subjects::requests::{
    CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest,
};
use crate::models::subjects::responses::{SubjectTeacherItem, SubjectWithTeachers};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_teacher, respond};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_data: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let name = subject_data.name.trim();
    if name.is_empty() {
        return Ok(respond::bad_request(ErrorCode::BadRequest, "Name is required"));
    }

    match storage.get_subject_by_name(name).await {
        Ok(Some(_)) => {
            return Ok(respond::bad_request(
                ErrorCode::SubjectAlreadyExists,
                format!("Subject {name} is already registered"),
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(respond::internal("Failed to check subject name", e)),
    }

    match storage
        .create_subject(name, subject_data.description.clone())
        .await
    {
        Ok(subject) => {
            info!("Subject {} created", subject.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) => Ok(respond::internal("Failed to create subject", e)),
    }
}

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    query: SubjectListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects(&query).await {
        Ok(subjects) => Ok(respond::ok(subjects, "Subjects retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to list subjects", e)),
    }
}

pub async fn my_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match current_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        // 没有教师档案时返回空列表
        Err(_) => {
            return Ok(respond::ok(
                Vec::<crate::models::subjects::entities::Subject>::new(),
                "Subjects retrieved",
            ));
        }
    };

    let subject_ids = match storage.subject_ids_of_teacher(teacher.id).await {
        Ok(ids) => ids,
        Err(e) => return Ok(respond::internal("Failed to load teacher subjects", e)),
    };
    match storage.subjects_by_ids(&subject_ids).await {
        Ok(subjects) => Ok(respond::ok(subjects, "Subjects retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to load subjects", e)),
    }
}

pub async fn get_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let subject = match storage.get_subject_by_id(subject_id).await {
        Ok(Some(subject)) => subject,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::SubjectNotFound,
                "Subject not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get subject", e)),
    };

    // 教师只能查看自己讲授的科目
    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher) {
        let teacher = match current_teacher(&storage, request).await {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        let teaches = match storage.subject_ids_of_teacher(teacher.id).await {
            Ok(ids) => ids.contains(&subject_id),
            Err(e) => return Ok(respond::internal("Failed to check teacher subjects", e)),
        };
        if !teaches {
            return Ok(respond::forbidden(
                ErrorCode::SubjectPermissionDenied,
                "You do not have permission to view this subject",
            ));
        }
    }

    // 附带讲授该科目的教师
    let teachers = match storage.teachers_of_subject(subject_id).await {
        Ok(teachers) => teachers,
        Err(e) => return Ok(respond::internal("Failed to load subject teachers", e)),
    };
    let mut teacher_items = Vec::with_capacity(teachers.len());
    for teacher in teachers {
        let user = match storage.get_user_by_id(teacher.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => continue,
            Err(e) => return Ok(respond::internal("Failed to load teacher user", e)),
        };
        teacher_items.push(SubjectTeacherItem {
            teacher_id: teacher.id,
            name: user.name,
            status: teacher.status,
            photo: user.photo,
        });
    }

    Ok(respond::ok(
        SubjectWithTeachers {
            subject,
            teachers: teacher_items,
        },
        "Subject retrieved successfully",
    ))
}

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    update_data: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let name = update_data.name.trim();
    if name.is_empty() {
        return Ok(respond::bad_request(ErrorCode::BadRequest, "Name is required"));
    }

    // 查重时排除自己
    match storage.get_subject_by_name(name).await {
        Ok(Some(existing)) if existing.id != subject_id => {
            return Ok(respond::bad_request(
                ErrorCode::SubjectAlreadyExists,
                format!("Subject {name} is already registered"),
            ));
        }
        Ok(_) => {}
        Err(e) => return Ok(respond::internal("Failed to check subject name", e)),
    }

    match storage
        .update_subject(subject_id, name, update_data.description.clone())
        .await
    {
        Ok(Some(subject)) => Ok(respond::ok(subject, "Subject updated successfully")),
        Ok(None) => Ok(respond::not_found(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        )),
        Err(e) => Ok(respond::internal("Failed to update subject", e)),
    }
}

pub async fn delete_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::SubjectNotFound,
                "Subject not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get subject", e)),
    }

    // 仍有教师讲授的科目不可删除
    match storage.teachers_of_subject(subject_id).await {
        Ok(teachers) if !teachers.is_empty() => {
            return Ok(respond::bad_request(
                ErrorCode::SubjectInUse,
                "Subject cannot be deleted while teachers are linked to it",
            ));
        }
        Ok(_) => {}
        Err(e) => return Ok(respond::internal("Failed to check subject teachers", e)),
    }

    match storage.delete_subject(subject_id).await {
        Ok(true) => {
            info!("Subject {} deleted", subject_id);
            Ok(respond::ok_empty("Subject deleted successfully"))
        }
        Ok(false) => Ok(respond::not_found(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        )),
        Err(e) => Ok(respond::internal("Failed to delete subject", e)),
    }
}
