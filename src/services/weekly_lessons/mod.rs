pub mod create;
pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::weekly_lessons::requests::{
    CreateWeeklyLessonRequest, UpdateWeeklyLessonRequest, WeeklyLessonQuery,
};
use crate::storage::Storage;

pub struct WeeklyLessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl WeeklyLessonService {
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

    pub async fn create_lesson(
        &self,
        req: &HttpRequest,
        lesson_data: CreateWeeklyLessonRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, req, lesson_data).await
    }

    pub async fn list_lessons(
        &self,
        req: &HttpRequest,
        query: WeeklyLessonQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, req, query).await
    }

    // 教师自己的课表（按星期分组）
    pub async fn my_lessons(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        list::my_lessons(self, req).await
    }

    // 学生的"接下来一周"视图
    pub async fn upcoming_lessons(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        list::upcoming_lessons(self, req).await
    }

    pub async fn get_lesson(&self, req: &HttpRequest, lesson_id: i64) -> ActixResult<HttpResponse> {
        manage::get_lesson(self, req, lesson_id).await
    }

    pub async fn update_lesson(
        &self,
        req: &HttpRequest,
        lesson_id: i64,
        update_data: UpdateWeeklyLessonRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_lesson(self, req, lesson_id, update_data).await
    }

    pub async fn delete_lesson(
        &self,
        req: &HttpRequest,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_lesson(self, req, lesson_id).await
    }
}
