pub mod list;
pub mod manage;
pub mod mark;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceListQuery, MarkAttendanceRequest, UpdateAttendanceRequest,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    // 一次为整个班点名
    pub async fn mark_attendance(
        &self,
        req: &HttpRequest,
        mark_data: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, req, mark_data).await
    }

    pub async fn list_attendances(
        &self,
        req: &HttpRequest,
        query: AttendanceListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_attendances(self, req, query).await
    }

    // 学生自己的缺勤汇总
    pub async fn my_absences(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        list::my_absences(self, req).await
    }

    pub async fn get_attendance(
        &self,
        req: &HttpRequest,
        attendance_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::get_attendance(self, req, attendance_id).await
    }

    pub async fn update_attendance(
        &self,
        req: &HttpRequest,
        attendance_id: i64,
        update_data: UpdateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_attendance(self, req, attendance_id, update_data).await
    }

    pub async fn delete_attendance(
        &self,
        req: &HttpRequest,
        attendance_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_attendance(self, req, attendance_id).await
    }
}
