use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::guardians::requests::{
    CreateGuardianRequest, GuardianListQuery, GuardianStudentLinkRequest, UpdateGuardianRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GuardianService;
use crate::utils::SafeGuardianIdI64;

// 懒加载的全局 GUARDIAN_SERVICE 实例
static GUARDIAN_SERVICE: Lazy<GuardianService> = Lazy::new(GuardianService::new_lazy);

// HTTP处理程序
pub async fn create_guardian(
    req: HttpRequest,
    guardian_data: web::Json<CreateGuardianRequest>,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE
        .create_guardian(&req, guardian_data.into_inner())
        .await
}

pub async fn list_guardians(
    req: HttpRequest,
    query: web::Query<GuardianListQuery>,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE.list_guardians(&req, query.into_inner()).await
}

pub async fn get_guardian(
    req: HttpRequest,
    guardian_id: SafeGuardianIdI64,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE.get_guardian(&req, guardian_id.0).await
}

pub async fn update_guardian(
    req: HttpRequest,
    guardian_id: SafeGuardianIdI64,
    update_data: web::Json<UpdateGuardianRequest>,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE
        .update_guardian(&req, guardian_id.0, update_data.into_inner())
        .await
}

pub async fn toggle_active(
    req: HttpRequest,
    guardian_id: SafeGuardianIdI64,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE.toggle_active(&req, guardian_id.0).await
}

pub async fn link_student(
    req: HttpRequest,
    link_data: web::Json<GuardianStudentLinkRequest>,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE.link_student(&req, link_data.into_inner()).await
}

pub async fn unlink_student(
    req: HttpRequest,
    link_data: web::Json<GuardianStudentLinkRequest>,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE
        .unlink_student(&req, link_data.into_inner())
        .await
}

pub async fn delete_guardian(
    req: HttpRequest,
    guardian_id: SafeGuardianIdI64,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE.delete_guardian(&req, guardian_id.0).await
}

// 配置路由（监护人管理仅限管理员）
pub fn configure_guardian_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/guardians")
            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_guardians))
                    .route(web::post().to(create_guardian)),
            )
            .service(web::resource("/link").route(web::post().to(link_student)))
            .service(web::resource("/unlink").route(web::post().to(unlink_student)))
            .service(
                web::resource("/{guardian_id}/toggle-active")
                    .route(web::put().to(toggle_active)),
            )
            .service(
                web::resource("/{guardian_id}")
                    .route(web::get().to(get_guardian))
                    .route(web::put().to(update_guardian))
                    .route(web::delete().to(delete_guardian)),
            ),
    );
}
