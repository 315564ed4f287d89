use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::UploadService;
use crate::utils::{SafePublicId, SafeUserIdI64};

// 懒加载的全局 UPLOAD_SERVICE 实例
static UPLOAD_SERVICE: Lazy<UploadService> = Lazy::new(UploadService::new_lazy);

// HTTP处理程序
pub async fn upload_profile_photo(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.upload_profile_photo(&req, payload).await
}

pub async fn upload_image(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.upload_image(&req, payload).await
}

pub async fn upload_profile_photo_for(
    req: HttpRequest,
    user_id: SafeUserIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE
        .upload_profile_photo_for(&req, user_id.0, payload)
        .await
}

pub async fn delete_profile_photo(
    req: HttpRequest,
    user_id: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.delete_profile_photo(&req, user_id.0).await
}

pub async fn delete_image(req: HttpRequest, public_id: SafePublicId) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.delete_image(&req, public_id.0).await
}

// 配置路由
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/uploads")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/profile").route(
                    web::post()
                        .to(upload_profile_photo)
                        // 上传按用户限流
                        .wrap(middlewares::RateLimit::file_upload()),
                ),
            )
            .service(
                web::resource("/image").route(
                    web::post()
                        .to(upload_image)
                        .wrap(middlewares::RateLimit::file_upload()),
                ),
            )
            .service(
                web::resource("/profile/{user_id}")
                    .route(
                        web::post()
                            .to(upload_profile_photo_for)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_profile_photo)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{public_id:.*}").route(
                    web::delete()
                        .to(delete_image)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            ),
    );
}
