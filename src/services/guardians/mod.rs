pub mod links;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::guardians::requests::{
    CreateGuardianRequest, GuardianListQuery, GuardianStudentLinkRequest, UpdateGuardianRequest,
};
use crate::storage::Storage;

pub struct GuardianService {
    storage: Option<Arc<dyn Storage>>,
}

impl GuardianService {
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

    pub async fn create_guardian(
        &self,
        req: &HttpRequest,
        guardian_data: CreateGuardianRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_guardian(self, req, guardian_data).await
    }

    pub async fn list_guardians(
        &self,
        req: &HttpRequest,
        query: GuardianListQuery,
    ) -> ActixResult<HttpResponse> {
        manage::list_guardians(self, req, query).await
    }

    pub async fn get_guardian(
        &self,
        req: &HttpRequest,
        guardian_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::get_guardian(self, req, guardian_id).await
    }

    pub async fn update_guardian(
        &self,
        req: &HttpRequest,
        guardian_id: i64,
        update_data: UpdateGuardianRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_guardian(self, req, guardian_id, update_data).await
    }

    pub async fn toggle_active(
        &self,
        req: &HttpRequest,
        guardian_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::toggle_active(self, req, guardian_id).await
    }

    pub async fn delete_guardian(
        &self,
        req: &HttpRequest,
        guardian_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_guardian(self, req, guardian_id).await
    }

    // 监护人与学生的关联/解除关联
    pub async fn link_student(
        &self,
        req: &HttpRequest,
        link: GuardianStudentLinkRequest,
    ) -> ActixResult<HttpResponse> {
        links::link_student(self, req, link).await
    }

    pub async fn unlink_student(
        &self,
        req: &HttpRequest,
        link: GuardianStudentLinkRequest,
    ) -> ActixResult<HttpResponse> {
        links::unlink_student(self, req, link).await
    }
}
