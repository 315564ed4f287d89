use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UserService;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, NewUser};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    user_data: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 管理员账号只在启动时播种，这里只允许创建学生/教师
    if user_data.role == UserRole::Admin {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidRole,
            "Role must be student or teacher",
        )));
    }

    if let Err(e) = validate_email(&user_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, e)));
    }
    if let Err(e) = validate_password_simple(&user_data.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, e)));
    }

    // 邮箱/CPF 查重
    match storage.get_user_by_email(&user_data.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::EmailAlreadyExists,
                "Email is already registered",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check email: {}", e);
            return Ok(internal_error());
        }
    }
    if let Some(cpf) = &user_data.cpf {
        match storage.get_user_by_cpf(cpf).await {
            Ok(Some(_)) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CpfAlreadyExists,
                    "CPF is already registered",
                )));
            }
            Ok(None) => {}
            Err(e) => {
                error!("Failed to check CPF: {}", e);
                return Ok(internal_error());
            }
        }
    }

    let password_hash = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(internal_error());
        }
    };

    let user = match storage
        .create_user(NewUser {
            name: user_data.name.clone(),
            email: user_data.email.clone(),
            password_hash,
            role: user_data.role,
            age: user_data.age,
            cpf: user_data.cpf.clone(),
            address: user_data.address.clone(),
            photo: None,
        })
        .await
    {
        Ok(user) => user,
        Err(e) => {
            error!("Failed to create user: {}", e);
            return Ok(internal_error());
        }
    };

    // 创建角色档案行；失败时补偿删除用户行
    match user_data.role {
        UserRole::Student => {
            let class_id = match user_data.class_id {
                Some(class_id) => class_id,
                None => {
                    let _ = storage.delete_user(user.id).await;
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::BadRequest,
                        "A student requires a class",
                    )));
                }
            };
            if let Err(e) = storage.create_student(user.id, Some(class_id)).await {
                error!("Failed to create student row: {}", e);
                let _ = storage.delete_user(user.id).await;
                return Ok(internal_error());
            }
        }
        UserRole::Teacher => {
            let teacher = match storage.create_teacher(user.id).await {
                Ok(teacher) => teacher,
                Err(e) => {
                    error!("Failed to create teacher row: {}", e);
                    let _ = storage.delete_user(user.id).await;
                    return Ok(internal_error());
                }
            };
            if !user_data.subject_ids.is_empty()
                && let Err(e) = storage
                    .set_teacher_subjects(teacher.id, &user_data.subject_ids)
                    .await
            {
                error!("Failed to link teacher subjects: {}", e);
            }
        }
        UserRole::Admin => unreachable!("admin role rejected above"),
    }

    info!("User {} created with role {}", user.email, user.role);
    Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        "Internal server error",
    ))
}
