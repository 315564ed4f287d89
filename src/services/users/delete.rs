use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::ErrorCode;
use crate::models::users::entities::UserRole;
use crate::services::respond;

pub async fn delete_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get user", e)),
    };

    // 同步删除角色档案行
    match user.role {
        UserRole::Student => {
            if let Ok(Some(student)) = storage.get_student_by_user_id(user_id).await {
                let _ = storage.delete_student(student.id).await;
            }
        }
        UserRole::Teacher => {
            if let Ok(Some(teacher)) = storage.get_teacher_by_user_id(user_id).await {
                let _ = storage.delete_teacher(teacher.id).await;
            }
        }
        UserRole::Admin => {}
    }

    match storage.delete_user(user_id).await {
        Ok(true) => {
            info!("User {} deleted", user.email);
            Ok(respond::ok_empty("User deleted successfully"))
        }
        Ok(false) => Ok(respond::not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(respond::internal("Failed to delete user", e)),
    }
}
