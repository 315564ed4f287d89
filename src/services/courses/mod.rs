pub mod chapters;
pub mod create;
pub mod delete;
pub mod enroll;
pub mod form;
pub mod list;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{AddChapterRequest, CourseListQuery, UpdateCourseRequest};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 创建课程（multipart：JSON 字段 + 封面/视频文件）
    pub async fn create_course(
        &self,
        req: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, req, payload).await
    }

    pub async fn list_courses(
        &self,
        req: &HttpRequest,
        query: CourseListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, req, query).await
    }

    pub async fn get_course(&self, req: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        list::get_course(self, req, course_id).await
    }

    pub async fn update_course(
        &self,
        req: &HttpRequest,
        course_id: i64,
        update_data: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, req, course_id, update_data).await
    }

    pub async fn add_chapter(
        &self,
        req: &HttpRequest,
        course_id: i64,
        chapter_data: AddChapterRequest,
    ) -> ActixResult<HttpResponse> {
        chapters::add_chapter(self, req, course_id, chapter_data).await
    }

    pub async fn delete_chapter(
        &self,
        req: &HttpRequest,
        course_id: i64,
        chapter_index: i32,
    ) -> ActixResult<HttpResponse> {
        chapters::delete_chapter(self, req, course_id, chapter_index).await
    }

    pub async fn delete_lesson(
        &self,
        req: &HttpRequest,
        course_id: i64,
        chapter_index: i32,
        lesson_index: i32,
    ) -> ActixResult<HttpResponse> {
        chapters::delete_lesson(self, req, course_id, chapter_index, lesson_index).await
    }

    // 学生查询/发起课程报名
    pub async fn check_enrollment(
        &self,
        req: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        enroll::check_enrollment(self, req, course_id).await
    }

    pub async fn enroll(&self, req: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        enroll::enroll(self, req, course_id).await
    }

    pub async fn delete_course(
        &self,
        req: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, req, course_id).await
    }
}
