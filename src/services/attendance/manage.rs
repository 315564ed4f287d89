use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use super::list::build_attendance_views;
use crate::middlewares::RequireJWT;
use crate::models::attendance::requests::UpdateAttendanceRequest;
use crate::models::users::entities::UserRole;
use crate::models::ErrorCode;
use crate::services::{current_teacher, respond};

pub async fn get_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let attendance = match storage.get_attendance_by_id(attendance_id).await {
        Ok(Some(attendance)) => attendance,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::AttendanceNotFound,
                "Attendance record not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get attendance", e)),
    };

    match build_attendance_views(&storage, vec![attendance]).await {
        Ok(mut views) => Ok(respond::ok(
            views.remove(0),
            "Attendance retrieved successfully",
        )),
        Err(e) => Ok(respond::internal("Failed to build attendance view", e)),
    }
}

pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_id: i64,
    update_data: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let attendance = match storage.get_attendance_by_id(attendance_id).await {
        Ok(Some(attendance)) => attendance,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::AttendanceNotFound,
                "Attendance record not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get attendance", e)),
    };

    // 教师只能改自己点的名
    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher) {
        let teacher = match current_teacher(&storage, request).await {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        if attendance.teacher_id != teacher.id {
            return Ok(respond::forbidden(
                ErrorCode::Forbidden,
                "You do not have permission to edit this record",
            ));
        }
    }

    match storage
        .set_attendance_present(attendance_id, update_data.present)
        .await
    {
        Ok(Some(attendance)) => Ok(respond::ok(attendance, "Attendance updated successfully")),
        Ok(None) => Ok(respond::not_found(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        )),
        Err(e) => Ok(respond::internal("Failed to update attendance", e)),
    }
}

pub async fn delete_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_attendance(attendance_id).await {
        Ok(true) => {
            info!("Attendance {} deleted", attendance_id);
            Ok(respond::ok_empty("Attendance deleted successfully"))
        }
        Ok(false) => Ok(respond::not_found(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        )),
        Err(e) => Ok(respond::internal("Failed to delete attendance", e)),
    }
}
