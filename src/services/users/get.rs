use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::ErrorCode;
use crate::services::respond;

pub async fn list_users(service: &UserService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_users().await {
        Ok(users) => Ok(respond::ok(users, "Users retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to list users", e)),
    }
}

pub async fn get_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(respond::ok(user, "User retrieved successfully")),
        Ok(None) => Ok(respond::not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(respond::internal("Failed to get user", e)),
    }
}
