use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::activities::requests::{
    ActivityListQuery, CreateActivityRequest, UpdateActivityRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ActivityService;
use crate::utils::SafeActivityIdI64;

// 懒加载的全局 ACTIVITY_SERVICE 实例
static ACTIVITY_SERVICE: Lazy<ActivityService> = Lazy::new(ActivityService::new_lazy);

// HTTP处理程序
pub async fn create_activity(
    req: HttpRequest,
    activity_data: web::Json<CreateActivityRequest>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .create_activity(&req, activity_data.into_inner())
        .await
}

pub async fn list_activities(
    req: HttpRequest,
    query: web::Query<ActivityListQuery>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .list_activities(&req, query.into_inner())
        .await
}

pub async fn get_activity(
    req: HttpRequest,
    activity_id: SafeActivityIdI64,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE.get_activity(&req, activity_id.0).await
}

pub async fn update_activity(
    req: HttpRequest,
    activity_id: SafeActivityIdI64,
    update_data: web::Json<UpdateActivityRequest>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .update_activity(&req, activity_id.0, update_data.into_inner())
        .await
}

pub async fn delete_activity(
    req: HttpRequest,
    activity_id: SafeActivityIdI64,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE.delete_activity(&req, activity_id.0).await
}

// 配置路由
pub fn configure_activity_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/activities")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 各角色看到的范围在服务层收窄
                    .route(web::get().to(list_activities))
                    .route(
                        web::post()
                            .to(create_activity)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{activity_id}")
                    .route(web::get().to(get_activity))
                    .route(
                        web::put()
                            .to(update_activity)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_activity)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
