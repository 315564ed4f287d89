pub mod classes;
pub mod create;
pub mod delete;
pub mod list;
pub mod profile;
pub mod report_card;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, ReportCardQuery, StudentListQuery, UpdateStudentRequest,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    pub async fn create_student(
        &self,
        req: &HttpRequest,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, req, student_data).await
    }

    // 学生本人的档案
    pub async fn get_me(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::get_me(self, req).await
    }

    // 管理员按 ID 查学生档案
    pub async fn get_student(
        &self,
        req: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        profile::get_student(self, req, student_id).await
    }

    pub async fn list_students(
        &self,
        req: &HttpRequest,
        query: StudentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, req, query).await
    }

    // 学生本人的班级履历
    pub async fn my_classes(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        classes::my_classes(self, req).await
    }

    pub async fn classes_of_student(
        &self,
        req: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        classes::classes_of_student(self, req, student_id).await
    }

    // 学生本人的成绩单
    pub async fn my_report_card(
        &self,
        req: &HttpRequest,
        query: ReportCardQuery,
    ) -> ActixResult<HttpResponse> {
        report_card::my_report_card(self, req, query).await
    }

    // 管理员/任课教师查看学生成绩单
    pub async fn report_card_of_student(
        &self,
        req: &HttpRequest,
        student_id: i64,
        query: ReportCardQuery,
    ) -> ActixResult<HttpResponse> {
        report_card::report_card_of_student(self, req, student_id, query).await
    }

    pub async fn update_student(
        &self,
        req: &HttpRequest,
        student_id: i64,
        update_data: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, req, student_id, update_data).await
    }

    pub async fn toggle_active(
        &self,
        req: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        update::toggle_active(self, req, student_id).await
    }

    pub async fn delete_student(
        &self,
        req: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, req, student_id).await
    }
}
