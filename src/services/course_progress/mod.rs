pub mod certificate;
pub mod detail;
pub mod list;
pub mod track;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::course_progress::requests::{
    CompleteLessonRequest, ProgressListQuery, SaveTimestampRequest,
};
use crate::storage::Storage;

pub struct CourseProgressService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseProgressService {
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

    // 学生把课时标记为已完成
    pub async fn complete_lesson(
        &self,
        req: &HttpRequest,
        complete_data: CompleteLessonRequest,
    ) -> ActixResult<HttpResponse> {
        track::complete_lesson(self, req, complete_data).await
    }

    // 保存视频播放位置（不改变完成状态）
    pub async fn save_video_timestamp(
        &self,
        req: &HttpRequest,
        timestamp_data: SaveTimestampRequest,
    ) -> ActixResult<HttpResponse> {
        track::save_video_timestamp(self, req, timestamp_data).await
    }

    // 学生自己的课程总览
    pub async fn my_courses(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        list::my_courses(self, req).await
    }

    // 管理员看某学生的课程进度
    pub async fn courses_of_student(
        &self,
        req: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::courses_of_student(self, req, student_id).await
    }

    pub async fn list_progress(
        &self,
        req: &HttpRequest,
        query: ProgressListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_progress(self, req, query).await
    }

    // 单个课程的章节级进度明细
    pub async fn course_progress(
        &self,
        req: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::course_progress(self, req, course_id).await
    }

    // 结课证书 PDF
    pub async fn certificate(&self, req: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        certificate::certificate(self, req, course_id).await
    }
}
