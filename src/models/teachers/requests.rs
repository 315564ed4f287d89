use serde::Deserialize;

use super::entities::TeacherStatus;
use crate::models::SortOrder;
use crate::models::users::entities::Address;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeacherRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: Option<i32>,
    pub cpf: Option<String>,
    pub postal_code: String,
    pub address: Address,
    #[serde(default)]
    pub subject_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeacherRequest {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub age: Option<i32>,
    pub cpf: Option<String>,
    pub postal_code: String,
    pub address: Address,
    pub class_ids: Option<Vec<i64>>,
    pub subject_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TeacherListQuery {
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub status: Option<TeacherStatus>,
    pub order: Option<SortOrder>,
}
