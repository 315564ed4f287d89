use serde::Deserialize;

use super::entities::StudentStatus;
use crate::models::SortOrder;
use crate::models::users::entities::Address;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: Option<i32>,
    pub cpf: Option<String>,
    pub postal_code: String,
    pub address: Address,
    #[serde(default)]
    pub guardian_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub age: Option<i32>,
    pub cpf: Option<String>,
    pub postal_code: String,
    pub address: Address,
    #[serde(default)]
    pub guardian_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StudentListQuery {
    pub class_id: Option<i64>,
    pub status: Option<StudentStatus>,
    pub order: Option<SortOrder>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReportCardQuery {
    pub school_year: Option<i32>,
    pub class_id: Option<i64>,
}
