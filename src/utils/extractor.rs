//! 路径参数提取器
//!
//! 解析失败时直接返回 400 统一响应，处理函数里拿到的一定是合法值。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: &str) -> actix_web::Error {
    InternalError::from_response(
        message.to_string(),
        actix_web::HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::BadRequest,
            message,
        )),
    )
    .into()
}

/// 定义 i64 路径参数提取器的宏
macro_rules! define_safe_id_extractor {
    ($(
        $name:ident($param:literal)
    ),* $(,)?) => {
        $(
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                    let result = req
                        .match_info()
                        .get($param)
                        .and_then(|raw| raw.parse::<i64>().ok())
                        .filter(|id| *id > 0)
                        .map($name)
                        .ok_or_else(|| {
                            bad_request(concat!("Invalid path parameter: ", $param))
                        });
                    ready(result)
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeIdI64("id"),
    SafeUserIdI64("user_id"),
    SafeStudentIdI64("student_id"),
    SafeTeacherIdI64("teacher_id"),
    SafeGuardianIdI64("guardian_id"),
    SafeClassIdI64("class_id"),
    SafeSubjectIdI64("subject_id"),
    SafeActivityIdI64("activity_id"),
    SafeScoreIdI64("score_id"),
    SafeReportCardIdI64("report_card_id"),
    SafeAttendanceIdI64("attendance_id"),
    SafeLessonIdI64("lesson_id"),
    SafeCourseIdI64("course_id"),
}

/// 章节/课时序号提取器（从 1 开始）
pub struct SafeChapterIndex {
    pub chapter: i32,
    pub lesson: Option<i32>,
}

impl FromRequest for SafeChapterIndex {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let chapter = req
            .match_info()
            .get("chapter")
            .and_then(|raw| raw.parse::<i32>().ok())
            .filter(|n| *n > 0);

        let lesson = match req.match_info().get("lesson") {
            Some(raw) => match raw.parse::<i32>().ok().filter(|n| *n > 0) {
                Some(n) => Some(Some(n)),
                None => None, // 存在但不合法
            },
            None => Some(None),
        };

        let result = match (chapter, lesson) {
            (Some(chapter), Some(lesson)) => Ok(SafeChapterIndex { chapter, lesson }),
            _ => Err(bad_request("Invalid chapter/lesson index")),
        };
        ready(result)
    }
}

/// 媒体资源 public_id 提取器（尾部通配路径）
pub struct SafePublicId(pub String);

impl FromRequest for SafePublicId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("public_id")
            .map(|raw| raw.trim_matches('/').to_string())
            .filter(|id| !id.is_empty() && !id.contains(".."))
            .map(SafePublicId)
            .ok_or_else(|| bad_request("Invalid media public id"));
        ready(result)
    }
}
