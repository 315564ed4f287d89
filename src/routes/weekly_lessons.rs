use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::weekly_lessons::requests::{
    CreateWeeklyLessonRequest, UpdateWeeklyLessonRequest, WeeklyLessonQuery,
};
use crate::services::WeeklyLessonService;
use crate::utils::SafeLessonIdI64;

// 懒加载的全局 LESSON_SERVICE 实例
static LESSON_SERVICE: Lazy<WeeklyLessonService> = Lazy::new(WeeklyLessonService::new_lazy);

// HTTP处理程序
pub async fn create_lesson(
    req: HttpRequest,
    lesson_data: web::Json<CreateWeeklyLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.create_lesson(&req, lesson_data.into_inner()).await
}

pub async fn list_lessons(
    req: HttpRequest,
    query: web::Query<WeeklyLessonQuery>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(&req, query.into_inner()).await
}

pub async fn my_lessons(req: HttpRequest) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.my_lessons(&req).await
}

pub async fn upcoming_lessons(req: HttpRequest) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.upcoming_lessons(&req).await
}

pub async fn get_lesson(req: HttpRequest, lesson_id: SafeLessonIdI64) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.get_lesson(&req, lesson_id.0).await
}

pub async fn update_lesson(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
    update_data: web::Json<UpdateWeeklyLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_lesson(&req, lesson_id.0, update_data.into_inner())
        .await
}

pub async fn delete_lesson(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(&req, lesson_id.0).await
}

// 配置路由
pub fn configure_weekly_lesson_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/weekly-lessons")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_lessons))
                    .route(
                        web::post()
                            .to(create_lesson)
                            // 排课仅限管理员
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/mine").route(
                    web::get()
                        .to(my_lessons)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/upcoming").route(
                    web::get()
                        .to(upcoming_lessons)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{lesson_id}")
                    .route(web::get().to(get_lesson))
                    .route(
                        web::put()
                            .to(update_lesson)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_lesson)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
