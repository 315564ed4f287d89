use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::course_progress::requests::{
    CompleteLessonRequest, ProgressListQuery, SaveTimestampRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CourseProgressService;
use crate::utils::{SafeCourseIdI64, SafeStudentIdI64};

// 懒加载的全局 PROGRESS_SERVICE 实例
static PROGRESS_SERVICE: Lazy<CourseProgressService> = Lazy::new(CourseProgressService::new_lazy);

// HTTP处理程序
pub async fn complete_lesson(
    req: HttpRequest,
    complete_data: web::Json<CompleteLessonRequest>,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE
        .complete_lesson(&req, complete_data.into_inner())
        .await
}

pub async fn save_video_timestamp(
    req: HttpRequest,
    timestamp_data: web::Json<SaveTimestampRequest>,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE
        .save_video_timestamp(&req, timestamp_data.into_inner())
        .await
}

pub async fn list_progress(
    req: HttpRequest,
    query: web::Query<ProgressListQuery>,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE.list_progress(&req, query.into_inner()).await
}

pub async fn my_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE.my_courses(&req).await
}

pub async fn courses_of_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE.courses_of_student(&req, student_id.0).await
}

pub async fn course_progress(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE.course_progress(&req, course_id.0).await
}

pub async fn certificate(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE.certificate(&req, course_id.0).await
}

// 配置路由
pub fn configure_course_progress_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/course-progress")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::get()
                        .to(list_progress)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/complete-lesson").route(
                    web::post()
                        .to(complete_lesson)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/video-timestamp").route(
                    web::post()
                        .to(save_video_timestamp)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/my-courses").route(
                    web::get()
                        .to(my_courses)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/students/{student_id}").route(
                    web::get()
                        .to(courses_of_student)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/courses/{course_id}").route(
                    web::get()
                        .to(course_progress)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/certificate/{course_id}").route(
                    web::get()
                        .to(certificate)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            ),
    );
}
