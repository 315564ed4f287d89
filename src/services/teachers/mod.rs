pub mod create;
pub mod delete;
pub mod list;
pub mod profile;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest,
};
use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    pub async fn create_teacher(
        &self,
        req: &HttpRequest,
        teacher_data: CreateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_teacher(self, req, teacher_data).await
    }

    // 教师本人的档案
    pub async fn get_me(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::get_me(self, req).await
    }

    pub async fn get_teacher(
        &self,
        req: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        profile::get_teacher(self, req, teacher_id).await
    }

    pub async fn list_teachers(
        &self,
        req: &HttpRequest,
        query: TeacherListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_teachers(self, req, query).await
    }

    pub async fn update_teacher(
        &self,
        req: &HttpRequest,
        teacher_id: i64,
        update_data: UpdateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, req, teacher_id, update_data).await
    }

    pub async fn toggle_active(
        &self,
        req: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        update::toggle_active(self, req, teacher_id).await
    }

    pub async fn delete_teacher(
        &self,
        req: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, req, teacher_id).await
    }
}
