use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::ErrorCode;
use crate::services::respond;

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_class(class_id).await {
        Ok(true) => {
            info!("Class {} deleted", class_id);
            Ok(respond::ok_empty("Class deleted successfully"))
        }
        Ok(false) => Ok(respond::not_found(
            ErrorCode::ClassNotFound,
            "Class not found",
        )),
        Err(e) => Ok(respond::internal("Failed to delete class", e)),
    }
}
