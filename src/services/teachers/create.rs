use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::TeacherService;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::models::teachers::responses::TeacherMutationResponse;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::NewUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond;
use crate::utils::password::hash_password;
use crate::utils::validate::{format_postal_code, validate_postal_code};

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_data: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if teacher_data.name.trim().is_empty()
        || teacher_data.email.trim().is_empty()
        || teacher_data.password.is_empty()
    {
        return Ok(respond::bad_request(
            ErrorCode::BadRequest,
            "Name, email and password are required",
        ));
    }

    if let Err(e) = validate_postal_code(&teacher_data.postal_code) {
        return Ok(respond::bad_request(ErrorCode::BadRequest, e));
    }

    match storage.get_user_by_email(teacher_data.email.trim()).await {
        Ok(Some(_)) => {
            return Ok(respond::bad_request(
                ErrorCode::EmailAlreadyExists,
                "Email is already registered",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(respond::internal("Failed to check email", e)),
    }

    if let Some(cpf) = &teacher_data.cpf {
        match storage.get_user_by_cpf(cpf).await {
            Ok(Some(_)) => {
                return Ok(respond::bad_request(
                    ErrorCode::CpfAlreadyExists,
                    "CPF is already registered",
                ));
            }
            Ok(None) => {}
            Err(e) => return Ok(respond::internal("Failed to check CPF", e)),
        }
    }

    let password_hash = match hash_password(&teacher_data.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(respond::internal("Password hashing failed", e)),
    };

    let mut address = teacher_data.address.clone();
    address.postal_code = format_postal_code(&teacher_data.postal_code);

    let user = match storage
        .create_user(NewUser {
            name: teacher_data.name.trim().to_string(),
            email: teacher_data.email.trim().to_lowercase(),
            password_hash,
            role: UserRole::Teacher,
            age: teacher_data.age,
            cpf: teacher_data.cpf.clone(),
            address: Some(address),
            photo: None,
        })
        .await
    {
        Ok(user) => user,
        Err(e) => return Ok(respond::internal("Failed to create user", e)),
    };

    // 班级在课程表里再关联，这里只挂科目
    let teacher = match storage.create_teacher(user.id).await {
        Ok(teacher) => teacher,
        Err(e) => {
            error!("Failed to create teacher row: {}", e);
            let _ = storage.delete_user(user.id).await;
            return Ok(respond::internal("Failed to create teacher", e));
        }
    };

    if !teacher_data.subject_ids.is_empty()
        && let Err(e) = storage
            .set_teacher_subjects(teacher.id, &teacher_data.subject_ids)
            .await
    {
        error!("Failed to link teacher subjects: {}", e);
    }

    info!("Teacher {} created for user {}", teacher.id, user.email);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        TeacherMutationResponse {
            user_id: user.id,
            teacher_id: teacher.id,
        },
        "Teacher created successfully",
    )))
}
