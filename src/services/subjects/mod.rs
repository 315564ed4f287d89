pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::requests::{
    CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest,
};
use crate::storage::Storage;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
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

    pub async fn create_subject(
        &self,
        req: &HttpRequest,
        subject_data: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_subject(self, req, subject_data).await
    }

    pub async fn list_subjects(
        &self,
        req: &HttpRequest,
        query: SubjectListQuery,
    ) -> ActixResult<HttpResponse> {
        manage::list_subjects(self, req, query).await
    }

    // 教师自己讲授的科目
    pub async fn my_subjects(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::my_subjects(self, req).await
    }

    pub async fn get_subject(
        &self,
        req: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::get_subject(self, req, subject_id).await
    }

    pub async fn update_subject(
        &self,
        req: &HttpRequest,
        subject_id: i64,
        update_data: UpdateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_subject(self, req, subject_id, update_data).await
    }

    pub async fn delete_subject(
        &self,
        req: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_subject(self, req, subject_id).await
    }
}
