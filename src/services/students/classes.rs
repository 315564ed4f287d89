use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ErrorCode;
use crate::services::{current_student, respond};

pub async fn my_classes(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    match storage.classes_of_student(student.id).await {
        Ok(classes) => Ok(respond::ok(classes, "Classes retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to list student classes", e)),
    }
}

pub async fn classes_of_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::StudentNotFound,
                "Student not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get student", e)),
    }

    match storage.classes_of_student(student_id).await {
        Ok(classes) => Ok(respond::ok(classes, "Classes retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to list student classes", e)),
    }
}
