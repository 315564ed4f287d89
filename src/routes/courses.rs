use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{AddChapterRequest, CourseListQuery, UpdateCourseRequest};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::{SafeChapterIndex, SafeCourseIdI64};

// 懒加载的全局 COURSE_SERVICE 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn create_course(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(&req, payload).await
}

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn get_course(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, course_id.0).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, course_id.0, update_data.into_inner())
        .await
}

pub async fn add_chapter(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    chapter_data: web::Json<AddChapterRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .add_chapter(&req, course_id.0, chapter_data.into_inner())
        .await
}

pub async fn check_enrollment(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.check_enrollment(&req, course_id.0).await
}

pub async fn enroll(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.enroll(&req, course_id.0).await
}

pub async fn delete_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, course_id.0).await
}

pub async fn delete_chapter(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    index: SafeChapterIndex,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .delete_chapter(&req, course_id.0, index.chapter)
        .await
}

pub async fn delete_lesson(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    index: SafeChapterIndex,
) -> ActixResult<HttpResponse> {
    let lesson = index.lesson.unwrap_or(0);
    COURSE_SERVICE
        .delete_lesson(&req, course_id.0, index.chapter, lesson)
        .await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(
                        // 教师创建自己的课程
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            )
            .service(
                web::resource("/{course_id}/enrollment").route(
                    web::get()
                        .to(check_enrollment)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{course_id}/enroll").route(
                    web::post()
                        .to(enroll)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{course_id}/chapters").route(
                    web::post()
                        .to(add_chapter)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{course_id}/chapters/{chapter}/lessons/{lesson}").route(
                    web::delete()
                        .to(delete_lesson)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{course_id}/chapters/{chapter}").route(
                    web::delete()
                        .to(delete_chapter)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{course_id}")
                    .route(web::get().to(get_course))
                    .route(
                        web::put()
                            .to(update_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
