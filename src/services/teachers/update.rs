use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use super::profile::build_teacher_profile;
use crate::models::ErrorCode;
use crate::models::teachers::entities::TeacherStatus;
use crate::models::teachers::requests::UpdateTeacherRequest;
use crate::models::teachers::responses::TeacherToggleActiveResponse;
use crate::models::users::requests::UserUpdate;
use crate::services::respond;
use crate::utils::password::hash_password;
use crate::utils::validate::{format_postal_code, validate_postal_code};

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
    update_data: UpdateTeacherRequest,
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

    let user = match storage.get_user_by_id(teacher.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get user", e)),
    };

    if update_data.name.trim().is_empty() || update_data.email.trim().is_empty() {
        return Ok(respond::bad_request(
            ErrorCode::BadRequest,
            "Name and email are required",
        ));
    }

    if update_data.email.trim().to_lowercase() != user.email {
        match storage.get_user_by_email(update_data.email.trim()).await {
            Ok(Some(other)) if other.id != user.id => {
                return Ok(respond::bad_request(
                    ErrorCode::EmailAlreadyExists,
                    "Email is already registered",
                ));
            }
            Ok(_) => {}
            Err(e) => return Ok(respond::internal("Failed to check email", e)),
        }
    }

    if let Some(cpf) = &update_data.cpf
        && Some(cpf) != user.cpf.as_ref()
    {
        match storage.get_user_by_cpf(cpf).await {
            Ok(Some(other)) if other.id != user.id => {
                return Ok(respond::bad_request(
                    ErrorCode::CpfAlreadyExists,
                    "CPF is already registered",
                ));
            }
            Ok(_) => {}
            Err(e) => return Ok(respond::internal("Failed to check CPF", e)),
        }
    }

    if let Err(e) = validate_postal_code(&update_data.postal_code) {
        return Ok(respond::bad_request(ErrorCode::BadRequest, e));
    }

    let password_hash = match &update_data.password {
        Some(password) if !password.is_empty() => match hash_password(password) {
            Ok(hash) => Some(hash),
            Err(e) => return Ok(respond::internal("Password hashing failed", e)),
        },
        _ => None,
    };

    let mut address = update_data.address.clone();
    address.postal_code = format_postal_code(&update_data.postal_code);

    if let Err(e) = storage
        .update_user(
            user.id,
            UserUpdate {
                name: Some(update_data.name.trim().to_string()),
                email: Some(update_data.email.trim().to_lowercase()),
                password_hash,
                age: update_data.age,
                cpf: update_data.cpf.clone(),
                address: Some(address),
            },
        )
        .await
    {
        return Ok(respond::internal("Failed to update user", e));
    }

    // 班级是幂等追加（成员关系归属班级侧），科目整体替换
    if let Some(class_ids) = &update_data.class_ids {
        for class_id in class_ids {
            if let Err(e) = storage.add_class_teacher(*class_id, teacher.id).await {
                return Ok(respond::internal("Failed to link teacher class", e));
            }
        }
    }
    if let Some(subject_ids) = &update_data.subject_ids
        && let Err(e) = storage.set_teacher_subjects(teacher.id, subject_ids).await
    {
        return Ok(respond::internal("Failed to relink teacher subjects", e));
    }

    match build_teacher_profile(&storage, teacher).await {
        Ok(profile) => Ok(respond::ok(profile, "Teacher updated successfully")),
        Err(e) => Ok(respond::internal("Failed to build teacher profile", e)),
    }
}

/// 封禁/解封：用户 active 翻转，教师状态随之切换 dismissed/active
pub async fn toggle_active(
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

    let user = match storage.get_user_by_id(teacher.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get user", e)),
    };

    let new_active = !user.active;
    if let Err(e) = storage.set_user_active(user.id, new_active).await {
        return Ok(respond::internal("Failed to toggle account", e));
    }

    let new_status = if new_active {
        TeacherStatus::Active
    } else {
        TeacherStatus::Dismissed
    };
    if let Err(e) = storage.set_teacher_status(teacher.id, new_status).await {
        return Ok(respond::internal("Failed to update teacher status", e));
    }

    let refreshed = match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(teacher)) => teacher,
        _ => teacher,
    };

    info!(
        "Teacher {} {}",
        teacher_id,
        if new_active { "unblocked" } else { "blocked" }
    );

    match build_teacher_profile(&storage, refreshed).await {
        Ok(profile) => Ok(respond::ok(
            TeacherToggleActiveResponse {
                active: new_active,
                teacher: profile,
            },
            if new_active {
                "Account activated successfully"
            } else {
                "Account blocked successfully"
            },
        )),
        Err(e) => Ok(respond::internal("Failed to build teacher profile", e)),
    }
}
