pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::activities::requests::{
    ActivityListQuery, CreateActivityRequest, UpdateActivityRequest,
};
use crate::storage::Storage;

pub struct ActivityService {
    storage: Option<Arc<dyn Storage>>,
}

impl ActivityService {
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

    pub async fn create_activity(
        &self,
        req: &HttpRequest,
        activity_data: CreateActivityRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_activity(self, req, activity_data).await
    }

    pub async fn list_activities(
        &self,
        req: &HttpRequest,
        query: ActivityListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_activities(self, req, query).await
    }

    pub async fn get_activity(
        &self,
        req: &HttpRequest,
        activity_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_activity(self, req, activity_id).await
    }

    pub async fn update_activity(
        &self,
        req: &HttpRequest,
        activity_id: i64,
        update_data: UpdateActivityRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_activity(self, req, activity_id, update_data).await
    }

    pub async fn delete_activity(
        &self,
        req: &HttpRequest,
        activity_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_activity(self, req, activity_id).await
    }
}
