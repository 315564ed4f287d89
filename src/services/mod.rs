pub mod activities;
pub mod activity_scores;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod course_progress;
pub mod courses;
pub mod dashboard;
pub mod guardians;
pub mod report_cards;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod uploads;
pub mod users;
pub mod weekly_lessons;

pub use activities::ActivityService;
pub use activity_scores::ActivityScoreService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use course_progress::CourseProgressService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use guardians::GuardianService;
pub use report_cards::ReportCardService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;
pub use uploads::UploadService;
pub use users::UserService;
pub use weekly_lessons::WeeklyLessonService;

use chrono::Datelike;

/// 当前学年（服务器本地时间的年份）
pub(crate) fn current_school_year() -> i32 {
    chrono::Local::now().year()
}

/// 统一响应构造，处理函数里大量复用
pub(crate) mod respond {
    use actix_web::HttpResponse;
    use serde::Serialize;

    use crate::models::{ApiResponse, ErrorCode};

    pub fn ok<T: Serialize>(data: T, message: &str) -> HttpResponse {
        HttpResponse::Ok().json(ApiResponse::success(data, message))
    }

    pub fn created<T: Serialize>(data: T, message: &str) -> HttpResponse {
        HttpResponse::Created().json(ApiResponse::success(data, message))
    }

    pub fn ok_empty(message: &str) -> HttpResponse {
        HttpResponse::Ok().json(ApiResponse::success_empty(message))
    }

    pub fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
    }

    pub fn unauthorized(message: impl Into<String>) -> HttpResponse {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            message,
        ))
    }

    pub fn forbidden(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
    }

    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
        HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
    }

    pub fn conflict(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
    }

    /// 数据库/内部错误：记录日志并返回 500
    pub fn internal(context: &str, err: impl std::fmt::Display) -> HttpResponse {
        tracing::error!("{context}: {err}");
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("{context}: {err}"),
        ))
    }
}

use std::sync::Arc;

use actix_web::HttpRequest;

use crate::middlewares::RequireJWT;
use crate::models::ErrorCode;
use crate::models::students::entities::Student;
use crate::models::teachers::entities::Teacher;
use crate::storage::Storage;

/// 取当前登录用户对应的教师档案；不存在时返回 403 响应
pub(crate) async fn current_teacher(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Teacher, actix_web::HttpResponse> {
    let user_id = RequireJWT::extract_user_id(request)
        .ok_or_else(|| respond::unauthorized("Unauthorized: missing user id"))?;

    match storage.get_teacher_by_user_id(user_id).await {
        Ok(Some(teacher)) => Ok(teacher),
        Ok(None) => Err(respond::forbidden(
            ErrorCode::TeacherNotFound,
            "Teacher profile not found",
        )),
        Err(e) => Err(respond::internal("Failed to load teacher profile", e)),
    }
}

/// 取当前登录用户对应的学生档案；不存在时返回 403 响应
pub(crate) async fn current_student(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Student, actix_web::HttpResponse> {
    let user_id = RequireJWT::extract_user_id(request)
        .ok_or_else(|| respond::unauthorized("Unauthorized: missing user id"))?;

    match storage.get_student_by_user_id(user_id).await {
        Ok(Some(student)) => Ok(student),
        Ok(None) => Err(respond::forbidden(
            ErrorCode::StudentNotFound,
            "Student profile not found",
        )),
        Err(e) => Err(respond::internal("Failed to load student profile", e)),
    }
}
