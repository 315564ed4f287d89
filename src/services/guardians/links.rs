use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GuardianService;
use crate::models::ErrorCode;
use crate::models::guardians::requests::GuardianStudentLinkRequest;
use crate::services::respond;

pub async fn link_student(
    service: &GuardianService,
    request: &HttpRequest,
    link: GuardianStudentLinkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_guardian_by_id(link.guardian_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::GuardianNotFound,
                "Guardian not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get guardian", e)),
    }

    match storage.get_student_by_id(link.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::StudentNotFound,
                "Student not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get student", e)),
    }

    match storage
        .add_student_guardian(link.student_id, link.guardian_id)
        .await
    {
        Ok(()) => Ok(respond::ok_empty("Link created successfully")),
        Err(e) => Ok(respond::internal("Failed to link guardian", e)),
    }
}

pub async fn unlink_student(
    service: &GuardianService,
    request: &HttpRequest,
    link: GuardianStudentLinkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .remove_student_guardian(link.student_id, link.guardian_id)
        .await
    {
        Ok(()) => Ok(respond::ok_empty("Link removed successfully")),
        Err(e) => Ok(respond::internal("Failed to unlink guardian", e)),
    }
}
