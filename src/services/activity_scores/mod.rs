pub mod grade;
pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::activity_scores::requests::{
    ScoreListQuery, SetDeliveryRequest, SetPresenceRequest, SetScoreRequest, UpdateScoreRequest,
};
use crate::storage::Storage;

pub struct ActivityScoreService {
    storage: Option<Arc<dyn Storage>>,
}

impl ActivityScoreService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_scores(
        &self,
        req: &HttpRequest,
        query: ScoreListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_scores(self, req, query).await
    }

    pub async fn get_score(&self, req: &HttpRequest, score_id: i64) -> ActixResult<HttpResponse> {
        list::get_score(self, req, score_id).await
    }

    // 打分（0-10 或清空）
    pub async fn set_score(
        &self,
        req: &HttpRequest,
        score_id: i64,
        score_data: SetScoreRequest,
    ) -> ActixResult<HttpResponse> {
        grade::set_score(self, req, score_id, score_data).await
    }

    // 考试的到场/缺考标记
    pub async fn set_presence(
        &self,
        req: &HttpRequest,
        score_id: i64,
        presence_data: SetPresenceRequest,
    ) -> ActixResult<HttpResponse> {
        grade::set_presence(self, req, score_id, presence_data).await
    }

    // 作业的交/未交标记
    pub async fn set_delivery(
        &self,
        req: &HttpRequest,
        score_id: i64,
        delivery_data: SetDeliveryRequest,
    ) -> ActixResult<HttpResponse> {
        grade::set_delivery(self, req, score_id, delivery_data).await
    }

    pub async fn update_score(
        &self,
        req: &HttpRequest,
        score_id: i64,
        update_data: UpdateScoreRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_score(self, req, score_id, update_data).await
    }

    pub async fn delete_score(
        &self,
        req: &HttpRequest,
        score_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_score(self, req, score_id).await
    }
}
