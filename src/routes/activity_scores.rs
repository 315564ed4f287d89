use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::activity_scores::requests::{
    ScoreListQuery, SetDeliveryRequest, SetPresenceRequest, SetScoreRequest, UpdateScoreRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ActivityScoreService;
use crate::utils::SafeScoreIdI64;

// 懒加载的全局 SCORE_SERVICE 实例
static SCORE_SERVICE: Lazy<ActivityScoreService> = Lazy::new(ActivityScoreService::new_lazy);

// HTTP处理程序
pub async fn list_scores(
    req: HttpRequest,
    query: web::Query<ScoreListQuery>,
) -> ActixResult<HttpResponse> {
    SCORE_SERVICE.list_scores(&req, query.into_inner()).await
}

pub async fn get_score(req: HttpRequest, score_id: SafeScoreIdI64) -> ActixResult<HttpResponse> {
    SCORE_SERVICE.get_score(&req, score_id.0).await
}

pub async fn set_score(
    req: HttpRequest,
    score_id: SafeScoreIdI64,
    score_data: web::Json<SetScoreRequest>,
) -> ActixResult<HttpResponse> {
    SCORE_SERVICE
        .set_score(&req, score_id.0, score_data.into_inner())
        .await
}

pub async fn set_presence(
    req: HttpRequest,
    score_id: SafeScoreIdI64,
    presence_data: web::Json<SetPresenceRequest>,
) -> ActixResult<HttpResponse> {
    SCORE_SERVICE
        .set_presence(&req, score_id.0, presence_data.into_inner())
        .await
}

pub async fn set_delivery(
    req: HttpRequest,
    score_id: SafeScoreIdI64,
    delivery_data: web::Json<SetDeliveryRequest>,
) -> ActixResult<HttpResponse> {
    SCORE_SERVICE
        .set_delivery(&req, score_id.0, delivery_data.into_inner())
        .await
}

pub async fn update_score(
    req: HttpRequest,
    score_id: SafeScoreIdI64,
    update_data: web::Json<UpdateScoreRequest>,
) -> ActixResult<HttpResponse> {
    SCORE_SERVICE
        .update_score(&req, score_id.0, update_data.into_inner())
        .await
}

pub async fn delete_score(req: HttpRequest, score_id: SafeScoreIdI64) -> ActixResult<HttpResponse> {
    SCORE_SERVICE.delete_score(&req, score_id.0).await
}

// 配置路由
pub fn configure_activity_score_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/activity-scores")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_scores)))
            .service(
                web::resource("/{score_id}/score").route(
                    web::post()
                        .to(set_score)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{score_id}/presence").route(
                    web::post()
                        .to(set_presence)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{score_id}/delivery").route(
                    web::post()
                        .to(set_delivery)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{score_id}")
                    .route(web::get().to(get_score))
                    .route(
                        web::put()
                            .to(update_score)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_score)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
