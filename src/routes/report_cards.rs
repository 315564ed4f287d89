use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::report_cards::requests::{
    CreateReportCardRequest, ReportCardListQuery, UpdateReportCardRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ReportCardService;
use crate::utils::SafeReportCardIdI64;

// 懒加载的全局 REPORT_CARD_SERVICE 实例
static REPORT_CARD_SERVICE: Lazy<ReportCardService> = Lazy::new(ReportCardService::new_lazy);

// HTTP处理程序
pub async fn create_report_card(
    req: HttpRequest,
    report_data: web::Json<CreateReportCardRequest>,
) -> ActixResult<HttpResponse> {
    REPORT_CARD_SERVICE
        .create_report_card(&req, report_data.into_inner())
        .await
}

pub async fn list_report_cards(
    req: HttpRequest,
    query: web::Query<ReportCardListQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_CARD_SERVICE
        .list_report_cards(&req, query.into_inner())
        .await
}

pub async fn my_report_cards(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_CARD_SERVICE.my_report_cards(&req).await
}

pub async fn get_report_card(
    req: HttpRequest,
    report_card_id: SafeReportCardIdI64,
) -> ActixResult<HttpResponse> {
    REPORT_CARD_SERVICE
        .get_report_card(&req, report_card_id.0)
        .await
}

pub async fn update_report_card(
    req: HttpRequest,
    report_card_id: SafeReportCardIdI64,
    update_data: web::Json<UpdateReportCardRequest>,
) -> ActixResult<HttpResponse> {
    REPORT_CARD_SERVICE
        .update_report_card(&req, report_card_id.0, update_data.into_inner())
        .await
}

pub async fn delete_report_card(
    req: HttpRequest,
    report_card_id: SafeReportCardIdI64,
) -> ActixResult<HttpResponse> {
    REPORT_CARD_SERVICE
        .delete_report_card(&req, report_card_id.0)
        .await
}

// 配置路由
pub fn configure_report_card_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/report-cards")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_report_cards))
                    .route(
                        web::post()
                            .to(create_report_card)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/mine").route(
                    web::get()
                        .to(my_report_cards)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{report_card_id}")
                    .route(web::get().to(get_report_card))
                    .route(
                        web::put()
                            .to(update_report_card)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_report_card)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
