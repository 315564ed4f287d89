use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use super::get::build_class_detail;
use crate::models::ErrorCode;
use crate::models::classes::requests::UpdateClassRequest;
use crate::services::respond;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let class = match storage.update_class(class_id, &update_data).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ClassNotFound,
                "Class not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to update class", e)),
    };

    // 名单仅在显式提供时整体替换
    if let Some(student_ids) = &update_data.student_ids
        && let Err(e) = storage.set_class_students(class_id, student_ids).await
    {
        return Ok(respond::internal("Failed to relink class students", e));
    }
    if let Some(teacher_ids) = &update_data.teacher_ids
        && let Err(e) = storage.set_class_teachers(class_id, teacher_ids).await
    {
        return Ok(respond::internal("Failed to relink class teachers", e));
    }
    if let Some(subject_ids) = &update_data.subject_ids
        && let Err(e) = storage.set_class_subjects(class_id, subject_ids).await
    {
        return Ok(respond::internal("Failed to relink class subjects", e));
    }

    match build_class_detail(&storage, class).await {
        Ok(detail) => Ok(respond::ok(detail, "Class updated successfully")),
        Err(e) => Ok(respond::internal("Failed to build class detail", e)),
    }
}
