pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::report_cards::requests::{
    CreateReportCardRequest, ReportCardListQuery, UpdateReportCardRequest,
};
use crate::storage::Storage;

pub struct ReportCardService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportCardService {
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

    pub async fn create_report_card(
        &self,
        req: &HttpRequest,
        report_data: CreateReportCardRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_report_card(self, req, report_data).await
    }

    pub async fn list_report_cards(
        &self,
        req: &HttpRequest,
        query: ReportCardListQuery,
    ) -> ActixResult<HttpResponse> {
        manage::list_report_cards(self, req, query).await
    }

    // 学生自己的成绩聚合列表
    pub async fn my_report_cards(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::my_report_cards(self, req).await
    }

    pub async fn get_report_card(
        &self,
        req: &HttpRequest,
        report_card_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::get_report_card(self, req, report_card_id).await
    }

    pub async fn update_report_card(
        &self,
        req: &HttpRequest,
        report_card_id: i64,
        update_data: UpdateReportCardRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_report_card(self, req, report_card_id, update_data).await
    }

    pub async fn delete_report_card(
        &self,
        req: &HttpRequest,
        report_card_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_report_card(self, req, report_card_id).await
    }
}
