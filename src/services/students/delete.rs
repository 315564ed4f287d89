use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::StudentService;
use crate::media::MediaHost;
use crate::models::ErrorCode;
use crate::services::respond;

pub async fn delete_student(
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

    // 头像清理失败不阻塞删除
    if let Some(photo) = &user.photo
        && let Err(e) = MediaHost::get().delete_image(&photo.public_id).await
    {
        warn!("Failed to delete avatar {}: {}", photo.public_id, e);
    }

    // 学生行（连同监护人/班级/成绩/出勤关联）与用户行一起删除
    if let Err(e) = storage.delete_student(student.id).await {
        return Ok(respond::internal("Failed to delete student", e));
    }
    if let Err(e) = storage.delete_user(user.id).await {
        return Ok(respond::internal("Failed to delete user", e));
    }

    info!("Student {} ({}) deleted", student_id, user.email);
    Ok(respond::ok_empty("Student deleted successfully"))
}
