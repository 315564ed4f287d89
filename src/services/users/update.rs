use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::ErrorCode;
use crate::models::users::requests::{UpdateUserRequest, UserUpdate};
use crate::services::respond;
use crate::utils::password::hash_password;

pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    update_data: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get user", e)),
    };

    // 邮箱查重（排除自己）
    if let Some(email) = &update_data.email
        && email != &existing.email
    {
        match storage.get_user_by_email(email).await {
            Ok(Some(other)) if other.id != user_id => {
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
        && Some(cpf) != existing.cpf.as_ref()
    {
        match storage.get_user_by_cpf(cpf).await {
            Ok(Some(other)) if other.id != user_id => {
                return Ok(respond::bad_request(
                    ErrorCode::CpfAlreadyExists,
                    "CPF is already registered",
                ));
            }
            Ok(_) => {}
            Err(e) => return Ok(respond::internal("Failed to check CPF", e)),
        }
    }

    // 仅当提供了密码时才重新哈希
    let password_hash = match &update_data.password {
        Some(password) if !password.is_empty() => match hash_password(password) {
            Ok(hash) => Some(hash),
            Err(e) => return Ok(respond::internal("Password hashing failed", e)),
        },
        _ => None,
    };

    let update = UserUpdate {
        name: update_data.name,
        email: update_data.email,
        password_hash,
        age: update_data.age,
        cpf: update_data.cpf,
        address: update_data.address,
    };

    match storage.update_user(user_id, update).await {
        Ok(Some(user)) => Ok(respond::ok(user, "User updated successfully")),
        Ok(None) => Ok(respond::not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(respond::internal("Failed to update user", e)),
    }
}
