use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use super::profile::build_student_profile;
use crate::models::ErrorCode;
use crate::models::students::entities::StudentStatus;
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::students::responses::ToggleActiveResponse;
use crate::models::users::requests::UserUpdate;
use crate::services::respond;
use crate::utils::password::hash_password;
use crate::utils::validate::{format_postal_code, validate_postal_code};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    update_data: UpdateStudentRequest,
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

    let user = match storage.get_user_by_id(student.user_id).await {
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

    // 邮箱查重（排除自己）
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

    // CPF 查重（排除自己）
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

    // 监护人校验（更新路径不做补偿删除，用户行保持原样）
    if update_data.guardian_ids.is_empty() {
        return Ok(respond::bad_request(
            ErrorCode::GuardianRequired,
            "At least one guardian is required",
        ));
    }
    if update_data.guardian_ids.len() > 2 {
        return Ok(respond::bad_request(
            ErrorCode::GuardianLimitExceeded,
            "At most 2 guardians are allowed",
        ));
    }
    match storage.get_guardians_by_ids(&update_data.guardian_ids).await {
        Ok(guardians) if guardians.len() == update_data.guardian_ids.len() => {}
        Ok(_) => {
            return Ok(respond::bad_request(
                ErrorCode::GuardianNotFound,
                "One or more guardians were not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to check guardians", e)),
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

    // 整体替换监护人关联
    if let Err(e) = storage
        .set_student_guardians(student.id, &update_data.guardian_ids)
        .await
    {
        return Ok(respond::internal("Failed to relink guardians", e));
    }

    match build_student_profile(&storage, student).await {
        Ok(profile) => Ok(respond::ok(profile, "Student updated successfully")),
        Err(e) => Ok(respond::internal("Failed to build student profile", e)),
    }
}

/// 封禁/解封：用户 active 翻转，学籍状态随之切换 locked/active
pub async fn toggle_active(
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

    let user = match storage.get_user_by_id(student.user_id).await {
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
        StudentStatus::Active
    } else {
        StudentStatus::Locked
    };
    if let Err(e) = storage.set_student_status(student.id, new_status).await {
        return Ok(respond::internal("Failed to update student status", e));
    }

    let refreshed = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        _ => student,
    };

    info!(
        "Student {} {}",
        student_id,
        if new_active { "unblocked" } else { "blocked" }
    );

    match build_student_profile(&storage, refreshed).await {
        Ok(profile) => Ok(respond::ok(
            ToggleActiveResponse {
                active: new_active,
                student: profile,
            },
            if new_active {
                "Account activated successfully"
            } else {
                "Account blocked successfully"
            },
        )),
        Err(e) => Ok(respond::internal("Failed to build student profile", e)),
    }
}
